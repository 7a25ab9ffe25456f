//! Per-weapon curve settings cache.
//!
//! Every joint's [`FitConfig`] is persisted as one JSON object keyed by joint
//! name, so rig tweaks survive scene reloads. Writes go straight to disk
//! (write-through); the tool is single-user and the files are small, so there
//! is no locking or batching.
//!
//! File placement follows the importer's layout: a weapon folder that exists
//! on disk gets `curve_settings.json` inside it, otherwise the settings land
//! in a shared cache directory as `{weapon_id}_curve_settings.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::fit::config::FitConfig;

/// Settings file name inside a weapon's own asset folder.
const WEAPON_FOLDER_FILE: &str = "curve_settings.json";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolve where a weapon's settings file lives.
///
/// The weapon's own folder wins when it exists on disk; the shared cache
/// directory is the fallback and is created on demand by [`CurveSettingsCache::open`].
#[must_use]
pub fn settings_file_path(
    weapon_id: &str,
    weapon_folder: Option<&Path>,
    cache_dir: &Path,
) -> PathBuf {
    if let Some(folder) = weapon_folder
        && folder.is_dir()
    {
        return folder.join(WEAPON_FOLDER_FILE);
    }
    cache_dir.join(format!("{weapon_id}_curve_settings.json"))
}

/// Write-through store of per-joint curve settings for one weapon.
#[derive(Debug, Clone)]
pub struct CurveSettingsCache {
    file: PathBuf,
    entries: BTreeMap<String, FitConfig>,
}

impl CurveSettingsCache {
    /// Open the cache for a weapon, loading any existing settings file.
    ///
    /// A missing file is an empty cache, not an error; an unreadable one is
    /// reported. The shared cache directory is created when it is needed.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the settings file exists but cannot be read or
    /// parsed, or when the cache directory cannot be created.
    pub fn open(
        weapon_id: &str,
        weapon_folder: Option<&Path>,
        cache_dir: &Path,
    ) -> Result<Self, CacheError> {
        if weapon_folder.is_none_or(|folder| !folder.is_dir()) && !cache_dir.is_dir() {
            fs::create_dir_all(cache_dir)?;
        }
        let file = settings_file_path(weapon_id, weapon_folder, cache_dir);
        Self::load(file)
    }

    /// Load a cache from an explicit settings file path.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when an existing file cannot be read or parsed.
    pub fn load(file: PathBuf) -> Result<Self, CacheError> {
        let entries = if file.is_file() {
            let text = fs::read_to_string(&file)?;
            let entries: BTreeMap<String, FitConfig> = serde_json::from_str(&text)?;
            debug!("loaded {} cached joint settings from {}", entries.len(), file.display());
            entries
        } else {
            debug!("no settings file at {}, starting empty", file.display());
            BTreeMap::new()
        };
        Ok(Self { file, entries })
    }

    /// Path of the backing settings file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    #[must_use]
    pub fn get(&self, joint: &str) -> Option<&FitConfig> {
        self.entries.get(joint)
    }

    /// Cached settings for a joint, or defaults when none are stored.
    #[must_use]
    pub fn config_for(&self, joint: &str) -> FitConfig {
        self.entries.get(joint).cloned().unwrap_or_default()
    }

    /// Store a joint's settings and persist the whole cache.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the file cannot be written; the in-memory entry is
    /// kept either way.
    pub fn set(&mut self, joint: &str, config: FitConfig) -> Result<(), CacheError> {
        self.entries.insert(joint.to_owned(), config);
        self.save()
    }

    /// Drop a joint's settings and persist. Unknown joints are a no-op.
    ///
    /// # Errors
    ///
    /// [`CacheError`] when the file cannot be written.
    pub fn remove(&mut self, joint: &str) -> Result<(), CacheError> {
        if self.entries.remove(joint).is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Joint names with cached settings, in sorted order.
    pub fn joints(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        if let Err(err) = fs::write(&self.file, &json) {
            warn!("could not write settings file {}: {err}", self.file.display());
            return Err(err.into());
        }
        debug!("saved {} joint settings to {}", self.entries.len(), self.file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::config::{ControlColor, ControlShape};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rigfit-cache-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_open_without_file_is_empty() {
        let dir = temp_dir("empty");
        let cache = CurveSettingsCache::open("ak74", None, &dir).unwrap();

        assert!(cache.is_empty());
        assert_eq!(
            cache.file().file_name().unwrap(),
            "ak74_curve_settings.json"
        );
        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_through_round_trip() {
        let dir = temp_dir("roundtrip");
        let mut cache = CurveSettingsCache::open("ak74", None, &dir).unwrap();

        let config = FitConfig::new()
            .with_offset(0.0, 1.5, 0.0)
            .with_shape(ControlShape::Cylinder)
            .with_color(ControlColor::Green);
        cache.set("jnt_magazine", config.clone()).unwrap();

        // A fresh load sees the entry.
        let reloaded = CurveSettingsCache::open("ak74", None, &dir).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get("jnt_magazine"), Some(&config));
        assert_eq!(reloaded.config_for("jnt_unknown"), FitConfig::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_weapon_folder_wins_when_present() {
        let dir = temp_dir("folder");
        let weapon_folder = dir.join("ak74");
        fs::create_dir_all(&weapon_folder).unwrap();

        let path = settings_file_path("ak74", Some(&weapon_folder), &dir);
        assert_eq!(path, weapon_folder.join("curve_settings.json"));

        // A folder that does not exist falls back to the cache dir.
        let missing = dir.join("nope");
        let path = settings_file_path("ak74", Some(&missing), &dir);
        assert_eq!(path, dir.join("ak74_curve_settings.json"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remove_persists() {
        let dir = temp_dir("remove");
        let mut cache = CurveSettingsCache::open("m701", None, &dir).unwrap();
        cache.set("jnt_bolt", FitConfig::default()).unwrap();
        cache.remove("jnt_bolt").unwrap();
        cache.remove("jnt_never_there").unwrap();

        let reloaded = CurveSettingsCache::open("m701", None, &dir).unwrap();
        assert!(reloaded.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
