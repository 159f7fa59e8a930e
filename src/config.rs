//! Site configuration module.
//!
//! Handles loading, validating, and merging `folio.toml`. The file lives
//! next to the content bundle and is entirely optional — stock defaults
//! cover everything.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! language = "en"           # Language rendered at the site root
//!
//! [colors]
//! background = "#181f2a"    # Page background
//! surface = "#1a374d"       # Cards and modal panels
//! text = "#e6f1ff"          # Primary text
//! text_muted = "#9aa7b8"    # Secondary text, labels
//! accent = "#00fff7"        # Neon accent (headings, buttons, bars)
//! accent_alt = "#00c3ff"    # Secondary accent (gradients, hovers)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the accent color
//! [colors]
//! accent = "#ff00aa"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `folio.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Language code rendered at the site root. Must exist in the bundle;
    /// there is no fallback order.
    pub language: String,
    /// Theme palette, emitted as CSS custom properties ahead of the
    /// embedded stylesheet.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::Validation("language must not be empty".into()));
        }
        for (name, value) in self.colors.entries() {
            if !value.starts_with('#') {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must be a hex color (got '{value}')"
                )));
            }
        }
        Ok(())
    }
}

/// Theme palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background.
    pub background: String,
    /// Cards and modal panels.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text: labels, periods, muted copy.
    pub text_muted: String,
    /// Neon accent: headings, buttons, progress bars.
    pub accent: String,
    /// Secondary accent: gradients, hover states.
    pub accent_alt: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#181f2a".to_string(),
            surface: "#1a374d".to_string(),
            text: "#e6f1ff".to_string(),
            text_muted: "#9aa7b8".to_string(),
            accent: "#00fff7".to_string(),
            accent_alt: "#00c3ff".to_string(),
        }
    }
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("accent", &self.accent),
            ("accent_alt", &self.accent_alt),
        ]
    }
}

/// Generate the `:root` custom-property block the stylesheet reads.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n  --bg: {};\n  --surface: {};\n  --text: {};\n  --muted: {};\n  --neon: {};\n  --neon-alt: {};\n}}",
        colors.background,
        colors.surface,
        colors.text,
        colors.text_muted,
        colors.accent,
        colors.accent_alt,
    )
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `folio.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `folio.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("folio.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `folio.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# neonfolio configuration
# =======================
# Place this file next to your content bundle (data.json).
# Every key is optional; the values below are the defaults.

# Language rendered at the site root. Other languages in the bundle are
# rendered under <code>/index.html. The code must exist in the bundle -
# there is no fallback order.
language = "en"

# Theme palette. Emitted as CSS custom properties, so a custom shell can
# read the same variables: --bg, --surface, --text, --muted, --neon,
# --neon-alt.
[colors]
background = "#181f2a"
surface = "#1a374d"
text = "#e6f1ff"
text_muted = "#9aa7b8"
accent = "#00fff7"
accent_alt = "#00c3ff"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_validate() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_config_round_trips() {
        let parsed: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(parsed)).unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.colors.accent, "#00fff7");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let overlay: toml::Value = toml::from_str(
            r##"
            [colors]
            accent = "#ff00aa"
        "##,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.colors.accent, "#ff00aa");
        assert_eq!(config.colors.background, "#181f2a");
        assert_eq!(config.language, "en");
    }

    #[test]
    fn unknown_keys_rejected() {
        let overlay: toml::Value = toml::from_str(r#"langauge = "en""#).unwrap();
        assert!(resolve_config(stock_defaults_value(), Some(overlay)).is_err());
    }

    #[test]
    fn empty_language_rejected() {
        let overlay: toml::Value = toml::from_str(r#"language = """#).unwrap();
        let err = resolve_config(stock_defaults_value(), Some(overlay)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn non_hex_color_rejected() {
        let overlay: toml::Value = toml::from_str(
            r##"
            [colors]
            accent = "red"
        "##,
        )
        .unwrap();
        assert!(matches!(
            resolve_config(stock_defaults_value(), Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.language, "en");
    }

    #[test]
    fn load_config_reads_folio_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("folio.toml"), r#"language = "de""#).unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.language, "de");
    }

    #[test]
    fn color_css_lists_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in ["--bg", "--surface", "--text", "--muted", "--neon", "--neon-alt"] {
            assert!(css.contains(var), "missing {var}");
        }
    }
}
