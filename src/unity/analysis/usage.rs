//! Decide which script GUIDs are provably used by scene content.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;
use rayon::prelude::*;

use super::super::models::{ProjectIndex, ScriptRecord};

/// GUIDs reachable from scene content.
///
/// Every attached owner is used. A field target is used only when the owner's
/// source still declares that field; `field_names` supplies the declared fields
/// of a registered script and is called at most once per owner.
pub fn used_guids<F>(index: &ProjectIndex, field_names: F) -> HashSet<String>
where
    F: Fn(&ScriptRecord) -> BTreeSet<String> + Sync,
{
    let owners: BTreeSet<&str> = index
        .references
        .iter()
        .filter(|r| !r.is_attachment() && !r.target_guid.is_empty())
        .map(|r| r.owner_guid.as_str())
        .collect();
    let fields: HashMap<&str, BTreeSet<String>> = owners
        .into_par_iter()
        .filter_map(|owner| {
            index
                .scripts
                .get(owner)
                .map(|record| (owner, field_names(record)))
        })
        .collect();

    let mut used = HashSet::new();
    for reference in &index.references {
        used.insert(reference.owner_guid.clone());
        if reference.is_attachment() || reference.target_guid.is_empty() {
            continue;
        }
        let declared = fields
            .get(reference.owner_guid.as_str())
            .is_some_and(|names| names.contains(&reference.field_name));
        if declared {
            used.insert(reference.target_guid.clone());
        } else {
            debug!(
                "stale field {}.{} -> {} ignored",
                reference.owner_guid, reference.field_name, reference.target_guid
            );
        }
    }
    used
}
