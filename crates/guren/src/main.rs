use anyhow::Context;
use clap::Parser;
use guren::config;
use guren::gui::app::{AppInit, AppModel, Story};
use guren::sys::runtime;
use guren_tree::Point;
use relm4::prelude::*;
use std::path::PathBuf;

/// Radial tree context menu demo.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Demo to run.
    #[arg(long, value_enum, default_value_t = Story::Basic)]
    story: Story,

    /// Click origin for the basic story.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], default_values_t = [100.0, 100.0])]
    origin: Vec<f64>,

    /// Config file to use instead of the user config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = config::resolve_config_path(cli.config.as_deref())?;

    if cli.write_config {
        config::write_default_config(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);
    let origin = match cli.origin.as_slice() {
        [x, y] => Point::new(*x, *y),
        _ => Point::new(100.0, 100.0),
    };

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(config_path.clone(), tx);

    let app = RelmApp::new("org.guren.guren").with_args(Vec::new());
    app.run::<AppModel>(AppInit {
        config,
        config_path,
        story: cli.story,
        origin,
        events: rx,
    });
    Ok(())
}
