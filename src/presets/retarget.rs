//! Retargeting preset files.
//!
//! Maps source-skeleton joints to control settings for animation transfer.
//! The file layout is flat: every top-level key is a joint name except
//! `post_bake_operations`, which lists transform fixups to run after baking.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PresetError;

const fn default_true() -> bool {
    true
}

/// Retarget settings for one joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointRetarget {
    /// Snap the control to the joint position before constraining.
    #[serde(default = "default_true")]
    pub align_position: bool,
    /// Extra rotation (degrees) applied to the connection node afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<[f64; 3]>,
}

impl Default for JointRetarget {
    fn default() -> Self {
        Self {
            align_position: true,
            rotate: None,
        }
    }
}

/// One post-bake fixup: a relative or absolute transform applied to a named
/// scene object after the animation bake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostBakeOperation {
    /// `"rotate"` or `"translate"`.
    #[serde(rename = "type")]
    pub op_type: String,
    pub object: String,
    #[serde(default)]
    pub values: [f64; 3],
    #[serde(default)]
    pub relative: bool,
}

/// A retargeting preset: per-joint settings plus post-bake operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetargetPreset {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_bake_operations: Vec<PostBakeOperation>,
    /// Joint name to settings; serialized as the file's top-level keys.
    #[serde(flatten)]
    pub joints: BTreeMap<String, JointRetarget>,
}

impl RetargetPreset {
    /// Load a preset from a JSON file.
    ///
    /// # Errors
    ///
    /// [`PresetError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the preset as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`PresetError`] when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Settings for a joint, falling back to the defaults the retargeter
    /// uses for unlisted joints.
    #[must_use]
    pub fn settings_for(&self, joint: &str) -> JointRetarget {
        self.joints.get(joint).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_file_layout() {
        let json = r#"{
            "jnt_root": {"align_position": true},
            "jnt_hand_r": {"align_position": false, "rotate": [0.0, 90.0, 0.0]},
            "post_bake_operations": [
                {"type": "rotate", "object": "S2_Controls", "values": [0.0, 180.0, 0.0], "relative": true}
            ]
        }"#;
        let preset: RetargetPreset = serde_json::from_str(json).unwrap();

        assert_eq!(preset.joints.len(), 2);
        assert_eq!(preset.post_bake_operations.len(), 1);
        assert_eq!(preset.post_bake_operations[0].op_type, "rotate");
        assert!(preset.post_bake_operations[0].relative);

        let hand = preset.settings_for("jnt_hand_r");
        assert!(!hand.align_position);
        assert_eq!(hand.rotate, Some([0.0, 90.0, 0.0]));

        // Unlisted joints align by default.
        assert!(preset.settings_for("jnt_spine").align_position);
    }

    #[test]
    fn test_round_trip_stays_flat() {
        let mut preset = RetargetPreset::default();
        preset
            .joints
            .insert("jnt_root".to_owned(), JointRetarget::default());

        let json = serde_json::to_string(&preset).unwrap();
        // Joint names sit at the top level, not under a "joints" key.
        assert!(json.contains("\"jnt_root\""));
        assert!(!json.contains("\"joints\""));
        // Empty operation lists are omitted entirely.
        assert!(!json.contains("post_bake_operations"));

        let back: RetargetPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, preset);
    }
}
