//! Engine settings supplied by the host.
//!
//! Every field has a default, so the host can pass a partial JSON object (or
//! nothing at all). Values are validated once at parse time; the engine
//! trusts them afterwards.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    COMPASS_DEFAULT_OPACITY, COMPASS_DEFAULT_SIZE, COMPASS_MAX_SIZE, COMPASS_MIN_SIZE, HIT_TOLERANCE_PX,
    LABEL_OFFSET_PX, MIN_DRAG_PX,
};

/// Line colors for planes 1..=8, in order.
pub const DEFAULT_PLANE_PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#EAB308", "#EF4444",
];

pub const DEFAULT_LABEL_FONT: &str = "bold 14px Arial";

/// Error returned by [`EngineConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not valid JSON for this shape.
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
    /// `plane_palette` must name at least one color.
    #[error("plane_palette must not be empty")]
    EmptyPalette,
    /// A numeric setting is negative, zero where that is meaningless, or not finite.
    #[error("invalid value for {field}: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum drag length, in CSS pixels, for a gesture to become a measurement.
    pub min_drag_px: f64,
    /// Click tolerance around a drawn segment, in CSS pixels.
    pub hit_tolerance_px: f64,
    /// Line colors indexed by `plane - 1`, wrapping when a plane exceeds the length.
    pub plane_palette: Vec<String>,
    /// CSS font used for measurement labels.
    pub label_font: String,
    /// Distance of a label from its segment midpoint, in CSS pixels.
    pub label_offset_px: f64,
    /// Compass diameter restored by a compass reset.
    pub compass_default_size: f64,
    /// Compass opacity restored by a compass reset.
    pub compass_default_opacity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_drag_px: MIN_DRAG_PX,
            hit_tolerance_px: HIT_TOLERANCE_PX,
            plane_palette: DEFAULT_PLANE_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            label_font: DEFAULT_LABEL_FONT.to_owned(),
            label_offset_px: LABEL_OFFSET_PX,
            compass_default_size: COMPASS_DEFAULT_SIZE,
            compass_default_opacity: COMPASS_DEFAULT_OPACITY,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or a value is unusable.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plane_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        positive("min_drag_px", self.min_drag_px)?;
        non_negative("hit_tolerance_px", self.hit_tolerance_px)?;
        non_negative("label_offset_px", self.label_offset_px)?;
        if !(COMPASS_MIN_SIZE..=COMPASS_MAX_SIZE).contains(&self.compass_default_size) {
            return Err(ConfigError::OutOfRange { field: "compass_default_size", value: self.compass_default_size });
        }
        if !(0.0..=1.0).contains(&self.compass_default_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "compass_default_opacity",
                value: self.compass_default_opacity,
            });
        }
        Ok(())
    }

    /// Line color for `plane`. Planes past the palette length reuse colors.
    #[must_use]
    pub fn plane_color(&self, plane: u8) -> &str {
        let len = self.plane_palette.len();
        if len == 0 {
            return DEFAULT_PLANE_PALETTE[0];
        }
        let idx = usize::from(plane.saturating_sub(1)) % len;
        &self.plane_palette[idx]
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
