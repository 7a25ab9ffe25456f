//! Naming conventions for joints, controls, and weapon identifiers.
//!
//! The skeletons this tool rigs come from an importer with fairly regular
//! naming (`AK74_jnt_magazine`, `SM_wpn_ak74_body`), but hand-edited scenes
//! drift. Lookups therefore go pattern-first with a fuzzy suggestion as the
//! fallback rather than failing hard.

use levenshtein::levenshtein;
use regex::Regex;
use wildmatch::WildMatch;

/// Default control suffix used when building new control names.
pub const DEFAULT_CONTROL_SUFFIX: &str = "_ctrl";

/// Candidate control names for a joint, in lookup priority order.
///
/// Covers the suffix and prefix conventions seen across imported rigs:
/// `jnt_trigger` yields `jnt_trigger_ctrl`, `jnt_trigger_control`,
/// `jnt_triggerCtrl`, `jnt_triggerControl`, `ctrl_jnt_trigger` and
/// `control_jnt_trigger`.
#[must_use]
pub fn control_name_candidates(joint: &str) -> Vec<String> {
    vec![
        format!("{joint}_ctrl"),
        format!("{joint}_control"),
        format!("{joint}Ctrl"),
        format!("{joint}Control"),
        format!("ctrl_{joint}"),
        format!("control_{joint}"),
    ]
}

/// Strip any namespace prefix (`rig:weapon:jnt_bolt` becomes `jnt_bolt`).
#[must_use]
pub fn strip_namespace(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Closest existing name to `target`, for "did you mean" fallbacks when a
/// direct lookup fails. Case-insensitive; `None` when nothing scores within
/// `max_distance` edits.
#[must_use]
pub fn closest_name<'a, I>(target: &str, names: I, max_distance: usize) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target = target.to_lowercase();
    names
        .into_iter()
        .map(|name| (levenshtein(&target, &name.to_lowercase()), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

/// Mesh-name pattern to weapon id, checked in order. The `ak` patterns come
/// first so `SM_wpn_ak74_receiver` does not fall through to the shorter
/// matches.
const MESH_WEAPON_PATTERNS: &[(&str, &str)] = &[
    ("*ak74*", "AK74"),
    ("*ak_*", "AK74"),
    ("*m16*", "M16"),
    ("*m4*", "M4"),
    ("*glock*", "GLOCK"),
    ("*ar15*", "AR15"),
];

/// Detect a weapon id from joint names, falling back to mesh names.
///
/// Joint names win: an uppercase leading token of 3+ characters
/// (`AK74_jnt_root`) is taken as the weapon id directly. Mesh names are
/// matched case-insensitively against the known weapon patterns.
#[must_use]
pub fn detect_weapon_id<'a, J, M>(joints: J, meshes: M) -> Option<String>
where
    J: IntoIterator<Item = &'a str>,
    M: IntoIterator<Item = &'a str>,
{
    for joint in joints {
        if let Some(id) = weapon_id_from_joint(joint) {
            log::debug!("weapon id {id} from joint {joint}");
            return Some(id);
        }
    }
    for mesh in meshes {
        if let Some(id) = weapon_id_from_mesh(mesh) {
            log::debug!("weapon id {id} from mesh {mesh}");
            return Some(id);
        }
    }
    None
}

/// Weapon id from a joint's leading name token, if it looks like one.
#[must_use]
pub fn weapon_id_from_joint(joint: &str) -> Option<String> {
    let token = strip_namespace(joint).split('_').next()?;
    if let Ok(re) = Regex::new(r"^[A-Z][A-Z0-9]{2,}$")
        && re.is_match(token)
    {
        return Some(token.to_owned());
    }
    None
}

/// Weapon id from a mesh name, via the known wildcard patterns.
#[must_use]
pub fn weapon_id_from_mesh(mesh: &str) -> Option<String> {
    let name = strip_namespace(mesh).to_lowercase();
    MESH_WEAPON_PATTERNS
        .iter()
        .find(|(pattern, _)| WildMatch::new(pattern).matches(&name))
        .map(|(_, id)| (*id).to_owned())
}
