//! Count summary formatting

use crate::core::WeaponCounts;

/// Render counts as a compact "10× slugga, 9× choppa" summary, skipping
/// weapons nothing currently carries. Map order, so output is stable.
pub fn counts_summary(counts: &WeaponCounts) -> String {
    counts
        .iter()
        .filter(|(_, &n)| n > 0)
        .map(|(name, n)| format!("{n}\u{d7} {name}"))
        .collect::<Vec<_>>()
        .join(", ")
}
