//! Engine configuration.

use crate::camera::{MAX_SCALE, MIN_SCALE};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid scale range: min {min} must be positive and below max {max}")]
    InvalidScaleRange { min: f64, max: f64 },
    #[error("Minimum node size must be positive, got {0}")]
    InvalidMinSize(f64),
    #[error("Minimum font size must be positive, got {0}")]
    InvalidMinFontSize(f64),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable constants of the interaction engine.
///
/// Screen-space values (`pen_close_threshold`, `handle_hit_tolerance`,
/// `hit_tolerance`) are in device pixels and divided by the camera scale
/// before being compared against world geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per wheel unit while zooming.
    pub zoom_sensitivity: f64,
    /// Floor applied to width/height when an interaction completes.
    pub min_node_size: f64,
    pub min_font_size: f64,
    pub default_font_size: f64,
    pub text_size: Size,
    pub sticky_size: Size,
    /// Size given to a generic shape placed by a click without a drag.
    pub shape_size: Size,
    pub pen_close_threshold: f64,
    pub handle_hit_tolerance: f64,
    pub hit_tolerance: f64,
    /// A select-tool press on empty background pans instead of box-selecting.
    pub empty_click_pans: bool,
    pub suggestion_radius: f64,
    /// Vertical squash of the suggestion arc.
    pub suggestion_flatten: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_sensitivity: 0.0015,
            min_node_size: 10.0,
            min_font_size: 8.0,
            default_font_size: 16.0,
            text_size: Size::new(200.0, 60.0),
            sticky_size: Size::new(200.0, 200.0),
            shape_size: Size::new(100.0, 100.0),
            pen_close_threshold: 10.0,
            handle_hit_tolerance: 8.0,
            hit_tolerance: 4.0,
            empty_click_pans: false,
            suggestion_radius: 250.0,
            suggestion_flatten: 0.8,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale < self.max_scale) {
            return Err(ConfigError::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.min_node_size <= 0.0 {
            return Err(ConfigError::InvalidMinSize(self.min_node_size));
        }
        if self.min_font_size <= 0.0 {
            return Err(ConfigError::InvalidMinFontSize(self.min_font_size));
        }
        let positive = [
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("default_font_size", self.default_font_size),
            ("pen_close_threshold", self.pen_close_threshold),
            ("handle_hit_tolerance", self.handle_hit_tolerance),
            ("suggestion_radius", self.suggestion_radius),
            ("suggestion_flatten", self.suggestion_flatten),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON and validate it. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
