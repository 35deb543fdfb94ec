use serde::{Deserialize, Serialize};

/// One parsed wargear option, immutable once produced.
///
/// Variants mirror the sentence shapes published in rulebooks. The raw
/// sentence is kept next to the parsed form (see `core::ParsedOption`)
/// so unmatched or partially-matched text still displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// "The X's A can be replaced with 1 B"
    SwapOne {
        who: String,
        removed: String,
        added: String,
    },
    /// "The X's A and B can be replaced with 1 C and 1 D"
    SwapMany {
        who: String,
        removed: Vec<String>,
        added: Vec<String>,
    },
    /// "Any number of X can each have their A replaced with B"
    AnyNumberSwap {
        who: String,
        removed: Vec<String>,
        added: Vec<String>,
    },
    /// "For every N models in this unit, 1 model ... can be equipped/replaced with ..."
    ///
    /// Each of the unit's `floor(quantity / every_n) * slots_per_n` slots
    /// independently picks one of `options` (or stays on the default).
    PerNModelsSwap {
        who: String,
        every_n: u32,
        slots_per_n: u32,
        removed: Vec<String>,
        options: Vec<String>,
    },
    /// "... can be replaced with one of the following: ..." - one choice
    /// applied once, with "Default" meaning no change
    NestedChoice {
        target: String,
        options: Vec<String>,
    },
    /// "This model can be equipped with [up to N] X" - pure addition
    EquipOptional { added: Vec<String>, max: u32 },
    /// Sentence outside the grammar; display-only
    Unrecognized { text: String },
}

impl Operation {
    /// Whether this operation's selection is a plain count (as opposed to
    /// a per-slot list or a named choice).
    pub fn takes_count(&self) -> bool {
        !matches!(
            self,
            Operation::PerNModelsSwap { .. } | Operation::NestedChoice { .. }
        )
    }
}
