//! Pager configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use pageview_geometry::Orientation;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scroll axis, fixed for the lifetime of the pager
    pub orientation: Orientation,
    /// Length of an animated `set_index`
    pub animation_duration_ms: u64,
    /// Height of the tab bar in a tab bar controller
    pub tab_bar_height: f64,
    /// Keep the pages of an open transition through a memory warning
    /// instead of cancelling it
    pub pin_transition_pages: bool,
}

impl Config {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.animation_duration_ms == 0 {
            return Err(CoreError::Config(
                "animation_duration_ms must be greater than zero".to_string(),
            ));
        }
        if !self.tab_bar_height.is_finite() || self.tab_bar_height < 0.0 {
            return Err(CoreError::Config(format!(
                "tab_bar_height must be a non-negative number, got {}",
                self.tab_bar_height
            )));
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            animation_duration_ms: 250,
            tab_bar_height: 50.0,
            pin_transition_pages: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.animation_duration(), Duration::from_millis(250));
        assert_eq!(config.tab_bar_height, 50.0);
        assert!(config.pin_transition_pages);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = Config::from_json(r#"{"orientation": "vertical"}"#).unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.animation_duration_ms, 250);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            Config::from_json(r#"{"animation_duration_ms": 0}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"tab_bar_height": -1.0}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"orientation": "diagonal"}"#),
            Err(CoreError::Serialization(_))
        ));
    }
}
