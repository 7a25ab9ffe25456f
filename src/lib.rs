#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Control-curve fitting engine for weapon rigs.
//!
//! Fits NURBS-ready control outlines to weapon part meshes: cluster the
//! part's vertex cloud, project it onto its dominant plane, take the convex
//! hull, drive the point count toward the configured smoothness, and apply
//! the joint's saved offset/rotation. The host DCC supplies vertex clouds and
//! builds the actual curves; everything in between lives here, along with the
//! per-weapon settings cache, the weapon catalog, and the preset file
//! formats.

pub mod fit;
pub mod geom;
pub mod naming;
pub mod presets;
pub mod weapons;

use std::path::{Path, PathBuf};

use log::info;

use fit::{CacheError, CurveSettingsCache, FitConfig, FitError, FitOutput, fit_control};
use geom::Point3;
use weapons::WeaponDb;

/// One rigging session for a detected weapon.
///
/// Owns the weapon identity, the per-joint settings cache, and the fit entry
/// points, so hosts hold a single handle instead of scattered globals. Edits
/// made through [`set_config`](Self::set_config) are written through to the
/// cache file immediately.
#[derive(Debug)]
pub struct FitSession {
    weapon_id: String,
    weapon_path: Option<PathBuf>,
    db: WeaponDb,
    cache: CurveSettingsCache,
}

impl FitSession {
    /// Start a session for a weapon.
    ///
    /// `scene_joints` and `scene_meshes` are the names the host found in the
    /// scene; the weapon identity is detected from them. `master_path` is the
    /// project root used to place the weapon folder and the settings cache.
    ///
    /// Returns `None` when no weapon can be detected; opening the cache for a
    /// detected weapon can still fail.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the settings cache exists but cannot be loaded.
    pub fn detect<'a>(
        scene_joints: impl IntoIterator<Item = &'a str>,
        scene_meshes: impl IntoIterator<Item = &'a str>,
        master_path: &Path,
    ) -> Result<Option<Self>, CacheError> {
        match naming::detect_weapon_id(scene_joints, scene_meshes) {
            Some(weapon_id) => Self::open(&weapon_id, master_path).map(Some),
            None => {
                info!("no weapon detected in scene");
                Ok(None)
            }
        }
    }

    /// Start a session for a known weapon id.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the settings cache exists but cannot be loaded.
    pub fn open(weapon_id: &str, master_path: &Path) -> Result<Self, CacheError> {
        let db = WeaponDb::builtin();
        let weapon_path = db
            .asset_path(weapon_id)
            .map(|relative| master_path.join(relative));
        let cache_dir = master_path.join("Scripts").join("weapon_cache");
        let cache = CurveSettingsCache::open(weapon_id, weapon_path.as_deref(), &cache_dir)?;

        info!(
            "session for weapon {weapon_id} ({} cached joints)",
            cache.len()
        );
        Ok(Self {
            weapon_id: weapon_id.to_owned(),
            weapon_path,
            db,
            cache,
        })
    }

    #[must_use]
    pub fn weapon_id(&self) -> &str {
        &self.weapon_id
    }

    /// Asset folder for this weapon under the master path, when the catalog
    /// knows it.
    #[must_use]
    pub fn weapon_path(&self) -> Option<&Path> {
        self.weapon_path.as_deref()
    }

    #[must_use]
    pub fn weapon_db(&self) -> &WeaponDb {
        &self.db
    }

    #[must_use]
    pub fn cache(&self) -> &CurveSettingsCache {
        &self.cache
    }

    /// Settings for a joint: cached values, or defaults for new joints.
    #[must_use]
    pub fn config_for(&self, joint: &str) -> FitConfig {
        self.cache.config_for(naming::strip_namespace(joint))
    }

    /// Store a joint's settings, writing the cache file through.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the cache file cannot be written.
    pub fn set_config(&mut self, joint: &str, config: FitConfig) -> Result<(), CacheError> {
        self.cache.set(naming::strip_namespace(joint), config)
    }

    /// Fit a joint's control from its mesh cloud using the joint's saved
    /// settings.
    ///
    /// # Errors
    ///
    /// [`FitError`] when the cloud is empty or collapses during fitting.
    pub fn fit_joint(
        &self,
        joint: &str,
        cloud: &[Point3],
        joint_position: Point3,
    ) -> Result<FitOutput, FitError> {
        let config = self.config_for(joint);
        fit_control(cloud, joint_position, &config)
    }
}
