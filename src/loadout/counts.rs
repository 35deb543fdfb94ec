//! Base weapon count projection
//!
//! Expands parsed loadout lines and a unit quantity into the
//! before-any-options weapon counts. The first line is the named leader
//! model (multiplicity 1), later lines are the rank and file (quantity - 1),
//! and an "Every model"/"Each model" line counts the whole unit.

use crate::core::WeaponCounts;
use crate::loadout::LoadoutLine;

fn is_whole_unit_role(role: &str) -> bool {
    let r = role.trim().to_lowercase();
    r.starts_with("every model") || r.starts_with("each model")
}

/// Project loadout lines and a unit quantity into a weapon count map.
/// Weapons appearing on more than one line accumulate.
pub fn project_base_counts(lines: &[LoadoutLine], quantity: u32) -> WeaponCounts {
    let mut counts = WeaponCounts::new();
    for (i, line) in lines.iter().enumerate() {
        let whole_unit = is_whole_unit_role(&line.role);
        let multiplicity = if whole_unit {
            quantity
        } else if i == 0 {
            // A leader line for an empty unit contributes nothing
            if quantity == 0 {
                0
            } else {
                1
            }
        } else {
            quantity.saturating_sub(1)
        };
        for weapon in &line.weapons {
            let weapon = weapon.trim();
            if !weapon.is_empty() {
                *counts.entry(weapon.to_string()).or_insert(0) += multiplicity;
            }
        }
    }
    counts
}
