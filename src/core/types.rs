//! Core type definitions used throughout the engine

use crate::grammar::Operation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weapon name -> count of models carrying it.
///
/// A `BTreeMap` keeps iteration order stable so summaries and resolved
/// output are deterministic across calls.
pub type WeaponCounts = BTreeMap<String, u32>;

/// The only numeric input the resolver needs beyond loadout and options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UnitContext {
    /// Number of models in the unit
    pub quantity: u32,
}

impl UnitContext {
    pub fn new(quantity: u32) -> Self {
        Self { quantity }
    }
}

/// One wargear option: the raw rulebook sentence plus its parsed form.
///
/// The raw text is kept for display; unrecognized sentences still render
/// even though they have no mechanical effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedOption {
    pub text: String,
    pub op: Operation,
}

impl ParsedOption {
    pub fn new(text: impl Into<String>, op: Operation) -> Self {
        Self {
            text: text.into(),
            op,
        }
    }
}

/// Lowercase and collapse whitespace so weapon names compare by content.
pub fn normalize_weapon_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Weapon identity policy: equal after normalization, or one name contained
/// in the other. The containment rule is inherited from the rulebook text,
/// where "boltgun" must match "boltgun with additional optics". It is loose
/// for short names ("axe" matches "battle axe"); every identity comparison
/// in the engine goes through this one predicate so the policy stays
/// consistent.
pub fn weapon_names_match(a: &str, b: &str) -> bool {
    let na = normalize_weapon_name(a);
    let nb = normalize_weapon_name(b);
    if na.is_empty() || nb.is_empty() {
        return na == nb;
    }
    na == nb || na.contains(&nb) || nb.contains(&na)
}
