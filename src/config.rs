//! Runtime configuration for rendering and export.
//!
//! Defaults match the stock card: 2x upscale on a white background after a
//! 300ms settle. The page may push a JSON override through `POST /api/config`;
//! missing fields fall back to their defaults.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Upscale factor handed to the rasterizer.
    pub export_scale: f64,
    /// Opaque background fill for the exported bitmap.
    pub export_background: String,
    /// Wait between entering capture mode and rasterizing.
    pub settle_delay_ms: u32,
    /// Filename stem used when no character name is entered.
    pub fallback_filename: String,
    /// Whether lock toggles render and partial reshuffles honor them.
    pub locks_enabled: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            export_scale: 2.0,
            export_background: "#ffffff".to_string(),
            settle_delay_ms: 300,
            fallback_filename: "interview".to_string(),
            locks_enabled: true,
        }
    }
}

impl CardConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CardConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.export_scale.is_finite() || self.export_scale <= 0.0 || self.export_scale > 8.0 {
            return Err(Error::InvalidConfig(format!(
                "export_scale must be in (0, 8], got {}",
                self.export_scale
            )));
        }
        if !is_hex_color(&self.export_background) {
            return Err(Error::InvalidConfig(format!(
                "export_background must be #rgb or #rrggbb, got {:?}",
                self.export_background
            )));
        }
        if self.fallback_filename.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "fallback_filename must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_export() {
        let c = CardConfig::default();
        assert_eq!(c.export_scale, 2.0);
        assert_eq!(c.export_background, "#ffffff");
        assert_eq!(c.settle_delay_ms, 300);
        assert_eq!(c.fallback_filename, "interview");
        assert!(c.locks_enabled);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = CardConfig::from_json(r#"{"locks_enabled": false}"#).unwrap();
        assert!(!c.locks_enabled);
        assert_eq!(c.export_scale, 2.0);
        assert_eq!(c.settle_delay_ms, 300);
    }

    #[test]
    fn rejects_bad_background() {
        let err = CardConfig::from_json(r#"{"export_background": "white"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_out_of_range_scale() {
        assert!(CardConfig::from_json(r#"{"export_scale": 0}"#).is_err());
        assert!(CardConfig::from_json(r#"{"export_scale": 12.5}"#).is_err());
        assert!(CardConfig::from_json(r##"{"export_scale": 3, "export_background": "#000"}"##).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(CardConfig::from_json("{not json").is_err());
    }
}
