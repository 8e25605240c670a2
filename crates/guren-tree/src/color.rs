use crate::error::ColorError;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static HEX_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]{2}").expect("valid regex"));
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})?$")
        .expect("valid regex")
});
static FN_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*(?:,\s*([\d.]+)\s*)?\)$")
        .expect("valid regex")
});

/// A colour as written by the user: hex (`#2081a5`, `#000000ee`) or `rgba(...)`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ColorSpec(String);

crate::impl_string_newtype!(ColorSpec);

impl ColorSpec {
    pub fn to_srgba(&self) -> Result<Srgba<f64>, ColorError> {
        parse_color(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    pub primary_color: ColorSpec,
    pub secondary_color: ColorSpec,
    pub backdrop_color: ColorSpec,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            primary_color: ColorSpec::from("#2081a5"),
            secondary_color: ColorSpec::from("#e01073"),
            backdrop_color: ColorSpec::from("#000000ee"),
        }
    }
}

/// Formats the first three two-character groups of `hex` as a CSS `rgba()`.
/// Channels that are missing or not hex fall back to 0.
pub fn hex2rgba(hex: &str, alpha: f64) -> String {
    let mut channels = HEX_PAIR
        .find_iter(hex)
        .map(|m| u8::from_str_radix(m.as_str(), 16).unwrap_or(0));
    let r = channels.next().unwrap_or(0);
    let g = channels.next().unwrap_or(0);
    let b = channels.next().unwrap_or(0);
    format!("rgba({r},{g},{b},{alpha})")
}

pub fn parse_color(input: &str) -> Result<Srgba<f64>, ColorError> {
    let input = input.trim();

    if let Some(caps) = HEX_COLOR.captures(input) {
        let channel = |i: usize| {
            caps.get(i)
                .and_then(|m| u8::from_str_radix(m.as_str(), 16).ok())
                .map(|v| v as f64 / 255.0)
        };
        return Ok(Srgba::new(
            channel(1).unwrap_or(0.0),
            channel(2).unwrap_or(0.0),
            channel(3).unwrap_or(0.0),
            channel(4).unwrap_or(1.0),
        ));
    }

    if let Some(caps) = FN_COLOR.captures(input) {
        let byte = |i: usize| -> Result<f64, ColorError> {
            let raw = &caps[i];
            raw.parse::<f64>()
                .ok()
                .filter(|v| (0.0..=255.0).contains(v))
                .map(|v| v / 255.0)
                .ok_or_else(|| ColorError::Channel(raw.to_string()))
        };
        let alpha = match caps.get(4) {
            Some(m) => m
                .as_str()
                .parse::<f64>()
                .ok()
                .filter(|v| (0.0..=1.0).contains(v))
                .ok_or_else(|| ColorError::Channel(m.as_str().to_string()))?,
            None => 1.0,
        };
        return Ok(Srgba::new(byte(1)?, byte(2)?, byte(3)?, alpha));
    }

    Err(ColorError::Unrecognised(input.to_string()))
}
