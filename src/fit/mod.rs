mod cache;
mod config;
mod pipeline;

pub use cache::{CacheError, CurveSettingsCache, settings_file_path};
pub use config::{
    ControlColor, ControlShape, FitConfig, ROTATION_UI_RANGE, SMOOTHNESS_DEFAULT, SMOOTHNESS_MAX,
    SMOOTHNESS_MIN, clamp_smoothness,
};
pub use pipeline::{FitDiagnostics, FitError, FitOutput, FittedCurve, fit_control, fit_outline};
