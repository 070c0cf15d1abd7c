use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Whether the theme follows a default or an explicit user choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Auto,
    Manual,
}

impl Default for ThemeMode {
    fn default() -> Self {
        Self::Auto
    }
}

impl ThemeMode {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "auto" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Colour scheme variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Light,
    Dark,
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Light
    }
}

impl ThemeVariant {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Visual theme preference, persisted under its own slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub mode: ThemeMode,
    #[serde(default)]
    pub variant: ThemeVariant,
}

/// Encode the theme for the theme slot
pub fn encode_theme(theme: &Theme) -> Result<String> {
    serde_json::to_string_pretty(theme).context("Failed to encode theme")
}

/// Decode the theme slot; any missing or invalid field falls back to its
/// default. Never fails.
pub fn decode_theme(payload: &str) -> Theme {
    let root: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(err) => {
            warn!("theme is not valid JSON, using defaults: {}", err);
            return Theme::default();
        }
    };

    let mode = root
        .get("mode")
        .and_then(Value::as_str)
        .and_then(ThemeMode::from_tag)
        .unwrap_or_default();
    let variant = root
        .get("variant")
        .and_then(Value::as_str)
        .and_then(ThemeVariant::from_tag)
        .unwrap_or_default();

    Theme { mode, variant }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.mode, ThemeMode::Auto);
        assert_eq!(theme.variant, ThemeVariant::Light);
    }

    #[test]
    fn test_theme_round_trip() {
        let theme = Theme {
            mode: ThemeMode::Manual,
            variant: ThemeVariant::Dark,
        };
        let decoded = decode_theme(&encode_theme(&theme).unwrap());
        assert_eq!(decoded, theme);
    }

    #[test]
    fn test_decode_garbage_uses_defaults() {
        assert_eq!(decode_theme("###"), Theme::default());
        assert_eq!(decode_theme("[]"), Theme::default());
    }

    #[test]
    fn test_decode_partial_theme() {
        let decoded = decode_theme(r#"{"variant": "dark"}"#);
        assert_eq!(decoded.mode, ThemeMode::Auto);
        assert_eq!(decoded.variant, ThemeVariant::Dark);

        let decoded = decode_theme(r#"{"mode": "manual", "variant": "sepia"}"#);
        assert_eq!(decoded.mode, ThemeMode::Manual);
        assert_eq!(decoded.variant, ThemeVariant::Light);
    }

    #[test]
    fn test_variant_toggled() {
        assert_eq!(ThemeVariant::Light.toggled(), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::Dark.toggled(), ThemeVariant::Light);
    }
}
