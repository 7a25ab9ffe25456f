//! Reference pose files.
//!
//! One JSON object per skeleton, keyed by joint name, holding the local
//! transform of every joint in the bind pose. The `jointOrient` key name is
//! fixed by the files already shipped with the importer data.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PresetError;

/// Local transform of one joint in the reference pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    pub translate: [f64; 3],
    pub rotate: [f64; 3],
    #[serde(rename = "jointOrient")]
    pub joint_orient: [f64; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
}

const fn unit_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            translate: [0.0; 3],
            rotate: [0.0; 3],
            joint_orient: [0.0; 3],
            scale: unit_scale(),
        }
    }
}

/// A full skeleton reference pose, keyed by joint name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferencePose {
    pub joints: BTreeMap<String, JointPose>,
}

impl ReferencePose {
    /// Load a reference pose from a JSON file.
    ///
    /// # Errors
    ///
    /// [`PresetError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the pose as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`PresetError`] when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, joint: &str) -> Option<&JointPose> {
        self.joints.get(joint)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}
