//! Persisted preset formats: reference poses and retargeting maps.

mod pose;
mod retarget;

use thiserror::Error;

pub use pose::{JointPose, ReferencePose};
pub use retarget::{JointRetarget, PostBakeOperation, RetargetPreset};

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preset JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
