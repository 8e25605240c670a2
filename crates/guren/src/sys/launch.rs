use crate::config::ShellCommand;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Spawns `command` through `sh -c` without waiting for it.
pub fn spawn_shell(command: &ShellCommand) -> Result<()> {
    if command.trim().is_empty() {
        anyhow::bail!("empty command");
    }

    Command::new("sh")
        .arg("-c")
        .arg(command.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn '{}'", command))?;

    log::info!("launched '{}'", command);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_command_is_rejected() {
        assert!(spawn_shell(&ShellCommand::from("   ")).is_err());
    }

    #[test]
    fn test_spawns_through_shell() {
        assert!(spawn_shell(&ShellCommand::from("true")).is_ok());
    }
}
