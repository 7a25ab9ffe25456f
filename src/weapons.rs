//! Built-in weapon database and asset-path derivation.
//!
//! Mirrors the importer's catalog: every weapon belongs to a category with a
//! fixed folder code, and its assets live under
//! `Source/Weapons/{category_folder}/{weapon_id}` relative to the project
//! master path. Custom categories can be added through JSON config files with
//! the same shape the importer writes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeaponDbError {
    #[error("weapon config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("weapon config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One weapon entry: display name plus the asset folder id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponEntry {
    pub name: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A weapon category: display name, asset folder code, weapons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponCategory {
    pub category_name: String,
    pub category_folder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub weapons: Vec<WeaponEntry>,
}

impl WeaponCategory {
    fn from_table(name: &str, folder: &str, weapons: &[(&str, &str)]) -> Self {
        Self {
            category_name: name.to_owned(),
            category_folder: folder.to_owned(),
            description: None,
            weapons: weapons
                .iter()
                .map(|(name, id)| WeaponEntry {
                    name: (*name).to_owned(),
                    id: (*id).to_owned(),
                    description: None,
                })
                .collect(),
        }
    }

    /// Load a custom category from a JSON config file.
    ///
    /// # Errors
    ///
    /// [`WeaponDbError`] when the file cannot be read or parsed.
    pub fn from_config_file(path: &Path) -> Result<Self, WeaponDbError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// The weapon catalog: the built-in categories plus any custom ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponDb {
    categories: Vec<WeaponCategory>,
}

impl WeaponDb {
    /// The catalog shipped with the toolkit.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = vec![
            WeaponCategory::from_table("Melee", "knifes", &[("Knife", "knife")]),
            WeaponCategory::from_table(
                "Pistols",
                "pt",
                &[
                    ("PTM", "pm"),
                    ("UDP Compact", "udp"),
                    ("APSB", "apb"),
                    ("Rhino", "rhino00000"),
                    ("Kora-1911", "kora"),
                ],
            ),
            WeaponCategory::from_table(
                "Shotguns",
                "shg",
                &[
                    ("Boomstick", "obrez"),
                    ("TOZ-34", "toz34"),
                    ("M680 Cracker", "m86000"),
                    ("SPSA-14", "spsa00"),
                    ("Saiga D-12", "d1200"),
                    ("RAM-2", "ram2"),
                ],
            ),
            WeaponCategory::from_table(
                "Submachine Guns",
                "smg",
                &[
                    ("Viper-5", "vip"),
                    ("AKM-74U", "aku"),
                    ("M10 Gordon", "m1000"),
                    ("Buket S-2", "bucket0"),
                    ("ZUBR-19", "zubr0"),
                    ("Integral-A", "integ"),
                ],
            ),
            WeaponCategory::from_table(
                "Assault Rifles",
                "ar",
                &[
                    ("AK74", "ak74"),
                    ("Fora-221", "fora0"),
                    ("Dnipro", "dnipro"),
                    ("GROM S-14", "grim0"),
                    ("AS Lavina", "lav"),
                    ("AR416", "m160"),
                    ("GP37", "gp37"),
                    ("Kharod", "kharod000"),
                    ("Sotnyk", "sotnyk"),
                ],
            ),
            WeaponCategory::from_table(
                "Sniper Rifles",
                "sr",
                &[
                    ("SVU MK S-3", "svu"),
                    ("SVDM-2", "svm"),
                    ("VS Vintar", "vintar"),
                    ("M701 Super", "m701"),
                    ("Mark 1 EMR", "mar"),
                    ("Three-Line Rifle", "threeline"),
                    ("Gauss Rifle", "gauss"),
                ],
            ),
            WeaponCategory::from_table(
                "Machine Guns",
                "mg",
                &[("RPM-74", "pkp00000"), ("PKP", "mgp")],
            ),
            WeaponCategory::from_table("Launchers", "gl", &[("RPG7U", "rpg7")]),
            WeaponCategory::from_table(
                "Grenades",
                "grenades",
                &[
                    ("F1 Grenade", "f1"),
                    ("RGD5 Grenade", "rgd5"),
                    ("Smoke Grenade", "smoke"),
                ],
            ),
        ];
        Self { categories }
    }

    /// Add a custom category (appended after the built-ins).
    pub fn add_category(&mut self, category: WeaponCategory) {
        self.categories.push(category);
    }

    #[must_use]
    pub fn categories(&self) -> &[WeaponCategory] {
        &self.categories
    }

    /// Find a weapon by identifier. Accepts the folder id in any case, or
    /// the display name with spaces and dashes squeezed out (`"kora1911"`
    /// finds the Kora-1911).
    #[must_use]
    pub fn find(&self, weapon_id: &str) -> Option<(&WeaponCategory, &WeaponEntry)> {
        let wanted = weapon_id.to_lowercase();
        for category in &self.categories {
            for weapon in &category.weapons {
                let squeezed: String = weapon
                    .name
                    .to_lowercase()
                    .chars()
                    .filter(|c| *c != ' ' && *c != '-')
                    .collect();
                if weapon.id.to_lowercase() == wanted || weapon.id == weapon_id || squeezed == wanted
                {
                    return Some((category, weapon));
                }
            }
        }
        None
    }

    /// Asset folder for a weapon, relative to the project master path:
    /// `Source/Weapons/{category_folder}/{weapon_id}`.
    #[must_use]
    pub fn asset_path(&self, weapon_id: &str) -> Option<PathBuf> {
        let (category, weapon) = self.find(weapon_id)?;
        Some(
            PathBuf::from("Source")
                .join("Weapons")
                .join(&category.category_folder)
                .join(&weapon.id),
        )
    }

    /// All known folder ids, for error messages and pickers.
    pub fn weapon_ids(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.weapons.iter().map(|w| w.id.as_str()))
    }
}

impl Default for WeaponDb {
    fn default() -> Self {
        Self::builtin()
    }
}
