use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use guren_tree::{ColorSpec, MenuStyle, hex2rgba, parse_color};
use palette::Srgba;

pub const ITEM_ALPHA: f64 = 0.75;
pub const ITEM_HOVER_ALPHA: f64 = 0.8;

pub struct ThemeColors {
    pub primary: Srgba<f64>,
    pub secondary: Srgba<f64>,
    pub backdrop: Srgba<f64>,
    pub item: Srgba<f64>,
    pub item_hovered: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    /// Resolves the configured style. Colours that don't parse fall back to
    /// the GTK theme.
    pub fn new(style: &MenuStyle, context: &gtk::StyleContext) -> Self {
        let secondary = Self::resolve(
            &style.secondary_color,
            context,
            "accent_color",
            Srgba::new(0.88, 0.06, 0.45, 1.0),
        );
        let (item, item_hovered) = Self::item_fills(style, secondary);
        Self {
            primary: Self::resolve(
                &style.primary_color,
                context,
                "theme_selected_bg_color",
                Srgba::new(0.13, 0.51, 0.65, 1.0),
            ),
            secondary,
            backdrop: Self::resolve(
                &style.backdrop_color,
                context,
                "theme_bg_color",
                Srgba::new(0.0, 0.0, 0.0, 0.93),
            ),
            item,
            item_hovered,
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
        }
    }

    fn resolve(
        spec: &ColorSpec,
        context: &gtk::StyleContext,
        fallback_name: &str,
        fallback: Srgba<f64>,
    ) -> Srgba<f64> {
        spec.to_srgba().unwrap_or_else(|e| {
            log::warn!("{}; using theme colour '{}'", e, fallback_name);
            Self::lookup_color(context, fallback_name, fallback, None)
        })
    }

    /// Item boxes are a see-through version of the secondary colour.
    fn item_fills(style: &MenuStyle, secondary: Srgba<f64>) -> (Srgba<f64>, Srgba<f64>) {
        (
            Self::translucent(&style.secondary_color, secondary, ITEM_ALPHA),
            Self::translucent(&style.secondary_color, secondary, ITEM_HOVER_ALPHA),
        )
    }

    fn translucent(spec: &ColorSpec, resolved: Srgba<f64>, alpha: f64) -> Srgba<f64> {
        let fallback = Srgba::new(resolved.red, resolved.green, resolved.blue, alpha);
        if !spec.starts_with('#') {
            return fallback;
        }
        parse_color(&hex2rgba(spec.as_str(), alpha)).unwrap_or(fallback)
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.guren-window, .guren-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
