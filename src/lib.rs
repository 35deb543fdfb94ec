//! Loadout Forge - Wargear Loadout Resolution Engine
//!
//! Parses free-form rulebook "wargear option" sentences into structured
//! operations and resolves a unit's default loadout, model count and saved
//! selections into exact per-weapon counts. Every public function is total:
//! irregular rulebook prose degrades to a safe default instead of failing.

pub mod core;
pub mod grammar;
pub mod loadout;
pub mod resolver;
pub mod selection;
pub mod summary;
pub mod text;
