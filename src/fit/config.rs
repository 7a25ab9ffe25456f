//! Per-joint curve configuration.
//!
//! One [`FitConfig`] is kept per driven joint and persisted to the weapon's
//! settings cache. The JSON field names are fixed by the existing cache files
//! shipped alongside weapon assets; changing them would orphan every saved
//! rig tweak.

use serde::{Deserialize, Serialize};

use crate::geom::Vec3;

/// Smoothness (CV budget) bounds exposed to the host UI.
pub const SMOOTHNESS_MIN: usize = 8;
pub const SMOOTHNESS_MAX: usize = 40;
pub const SMOOTHNESS_DEFAULT: usize = 20;

/// Rotation range exposed to the host UI, in degrees. Values outside the
/// range are accepted from old cache files and applied as-is.
pub const ROTATION_UI_RANGE: (f64, f64) = (-180.0, 180.0);

/// Control shape requested for a joint. `Custom` means "fit the mesh";
/// the rest pick a primitive wire template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlShape {
    #[default]
    Custom,
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "cylinder")]
    Cylinder,
    #[serde(rename = "sphere")]
    Sphere,
}

/// Display color for a control, stored by name and mapped to the host's
/// drawing-override palette on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlColor {
    Yellow,
    #[default]
    Red,
    Blue,
    Green,
    Purple,
    #[serde(rename = "light blue")]
    LightBlue,
    Orange,
    Pink,
    #[serde(rename = "light green")]
    LightGreen,
    White,
}

impl ControlColor {
    /// Host (Maya) drawing-override color index.
    #[must_use]
    pub const fn host_index(self) -> u8 {
        match self {
            Self::Yellow => 17,
            Self::Red => 13,
            Self::Blue => 6,
            Self::Green => 14,
            Self::Purple => 9,
            Self::LightBlue => 18,
            Self::Orange => 12,
            Self::Pink => 20,
            Self::LightGreen => 19,
            Self::White => 16,
        }
    }
}

/// Per-joint curve settings, persisted in the weapon settings cache.
///
/// The flat `curve_offset_*`/`curve_rotation_*` keys mirror the cache file
/// layout; [`offset`](Self::offset) and [`rotation`](Self::rotation) expose
/// them as vectors for the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    #[serde(default)]
    pub curve_offset_x: f64,
    #[serde(default)]
    pub curve_offset_y: f64,
    #[serde(default)]
    pub curve_offset_z: f64,
    /// Rotation about X in degrees, applied first.
    #[serde(default)]
    pub curve_rotation_x: f64,
    #[serde(default)]
    pub curve_rotation_y: f64,
    #[serde(default)]
    pub curve_rotation_z: f64,
    #[serde(default)]
    pub control_shape: ControlShape,
    #[serde(default = "default_scale")]
    pub control_scale: f64,
    #[serde(default)]
    pub control_color: ControlColor,
    /// Target CV count for the fitted outline. Not part of the original
    /// cache layout, so older files fall back to the default.
    #[serde(default = "default_smoothness")]
    pub smoothness: usize,
}

fn default_scale() -> f64 {
    1.0
}

const fn default_smoothness() -> usize {
    SMOOTHNESS_DEFAULT
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            curve_offset_x: 0.0,
            curve_offset_y: 0.0,
            curve_offset_z: 0.0,
            curve_rotation_x: 0.0,
            curve_rotation_y: 0.0,
            curve_rotation_z: 0.0,
            control_shape: ControlShape::default(),
            control_scale: 1.0,
            control_color: ControlColor::default(),
            smoothness: SMOOTHNESS_DEFAULT,
        }
    }
}

impl FitConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_offset(mut self, x: f64, y: f64, z: f64) -> Self {
        self.curve_offset_x = x;
        self.curve_offset_y = y;
        self.curve_offset_z = z;
        self
    }

    #[must_use]
    pub const fn with_rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.curve_rotation_x = x;
        self.curve_rotation_y = y;
        self.curve_rotation_z = z;
        self
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: ControlShape) -> Self {
        self.control_shape = shape;
        self
    }

    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.control_scale = scale;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: ControlColor) -> Self {
        self.control_color = color;
        self
    }

    /// Smoothness clamped to the UI range.
    #[must_use]
    pub const fn with_smoothness(mut self, smoothness: usize) -> Self {
        self.smoothness = clamp_smoothness(smoothness);
        self
    }

    #[must_use]
    pub const fn offset(&self) -> Vec3 {
        Vec3::new(self.curve_offset_x, self.curve_offset_y, self.curve_offset_z)
    }

    #[must_use]
    pub const fn rotation(&self) -> Vec3 {
        Vec3::new(
            self.curve_rotation_x,
            self.curve_rotation_y,
            self.curve_rotation_z,
        )
    }

    /// True when applying this config would not move a single point.
    #[must_use]
    pub fn is_identity_transform(&self) -> bool {
        self.curve_offset_x == 0.0
            && self.curve_offset_y == 0.0
            && self.curve_offset_z == 0.0
            && self.curve_rotation_x == 0.0
            && self.curve_rotation_y == 0.0
            && self.curve_rotation_z == 0.0
    }
}

/// Clamp a smoothness value to the supported range.
#[must_use]
pub const fn clamp_smoothness(value: usize) -> usize {
    if value < SMOOTHNESS_MIN {
        SMOOTHNESS_MIN
    } else if value > SMOOTHNESS_MAX {
        SMOOTHNESS_MAX
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::default();
        assert_eq!(config.control_shape, ControlShape::Custom);
        assert_eq!(config.control_color, ControlColor::Red);
        assert_eq!(config.control_scale, 1.0);
        assert_eq!(config.smoothness, SMOOTHNESS_DEFAULT);
        assert!(config.is_identity_transform());
    }

    #[test]
    fn test_smoothness_clamping() {
        assert_eq!(clamp_smoothness(0), SMOOTHNESS_MIN);
        assert_eq!(clamp_smoothness(20), 20);
        assert_eq!(clamp_smoothness(100), SMOOTHNESS_MAX);
        assert_eq!(FitConfig::new().with_smoothness(4).smoothness, 8);
    }

    #[test]
    fn test_host_color_indices() {
        assert_eq!(ControlColor::Red.host_index(), 13);
        assert_eq!(ControlColor::Yellow.host_index(), 17);
        assert_eq!(ControlColor::LightBlue.host_index(), 18);
        assert_eq!(ControlColor::White.host_index(), 16);
    }

    #[test]
    fn test_cache_field_names_round_trip() {
        let config = FitConfig::new()
            .with_offset(1.0, 2.0, 3.0)
            .with_rotation(0.0, 90.0, 0.0)
            .with_shape(ControlShape::Sphere)
            .with_color(ControlColor::LightGreen);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"curve_offset_x\":1.0"));
        assert!(json.contains("\"control_shape\":\"sphere\""));
        assert!(json.contains("\"control_color\":\"light green\""));

        let back: FitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_legacy_cache_entry_gets_defaults() {
        // Old cache files carry only the offset/rotation keys.
        let json = r#"{
            "curve_offset_x": 0.5,
            "curve_rotation_z": 45.0,
            "control_shape": "box",
            "control_color": "yellow"
        }"#;
        let config: FitConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.curve_offset_x, 0.5);
        assert_eq!(config.curve_rotation_z, 45.0);
        assert_eq!(config.control_shape, ControlShape::Box);
        assert_eq!(config.control_scale, 1.0);
        assert_eq!(config.smoothness, SMOOTHNESS_DEFAULT);
    }
}
