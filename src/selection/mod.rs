//! User selection state for wargear options
//!
//! Selections are keyed by the option's position in the option list;
//! persisted state references options positionally, so insertion order is
//! part of the contract.

pub mod codec;

use crate::grammar::Operation;
use serde::{Deserialize, Serialize};

/// The "no change" sentinel for nested choices.
pub const DEFAULT_CHOICE: &str = "Default";

/// The user's current choice for one operation. The shape depends on the
/// operation variant: a count for swaps and optional equipment, one label
/// per slot for "for every N models" rules, a single label for nested
/// choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Count(u32),
    Choice(String),
    Slots(Vec<String>),
}

impl Selection {
    /// The zero/empty selection for an operation, used before the user has
    /// chosen anything and as the fallback when persisted state fails to
    /// decode.
    pub fn default_for(op: &Operation) -> Selection {
        match op {
            Operation::PerNModelsSwap { .. } => Selection::Slots(Vec::new()),
            Operation::NestedChoice { .. } => Selection::Choice(DEFAULT_CHOICE.to_string()),
            _ => Selection::Count(0),
        }
    }
}
