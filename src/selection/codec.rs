//! Compact line format for persisted selections
//!
//! Each selection becomes one or more `w2|<index>|...` lines keyed by the
//! option's position. The format is forgiving on the way in: lines that
//! fail to parse, reference an out-of-range option, or do not fit the
//! operation's selection shape are dropped, leaving that operation on its
//! default. A corrupt saved row must never break resolution.

use crate::core::ParsedOption;
use crate::grammar::Operation;
use crate::selection::{Selection, DEFAULT_CHOICE};

const PREFIX: &str = "w2";

/// Encode selections to persistable lines. Scalar selections become
/// `w2|idx|value`; slot lists become one `w2|idx|slot|choice` line per
/// populated slot.
pub fn encode(selections: &[Selection]) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, sel) in selections.iter().enumerate() {
        match sel {
            Selection::Count(n) => lines.push(format!("{PREFIX}|{idx}|{n}")),
            Selection::Choice(choice) => lines.push(format!("{PREFIX}|{idx}|{choice}")),
            Selection::Slots(slots) => {
                for (slot, choice) in slots.iter().enumerate() {
                    if !choice.is_empty() {
                        lines.push(format!("{PREFIX}|{idx}|{slot}|{choice}"));
                    }
                }
            }
        }
    }
    lines
}

/// Decode persisted lines against the option list they were saved for.
/// Always returns one selection per option; anything that fails to decode
/// stays on `Selection::default_for`.
pub fn decode(lines: &[String], options: &[ParsedOption]) -> Vec<Selection> {
    let mut selections: Vec<Selection> = options
        .iter()
        .map(|opt| Selection::default_for(&opt.op))
        .collect();

    for line in lines {
        let line = line.trim();
        let mut parts = line.split('|');
        if parts.next() != Some(PREFIX) {
            continue;
        }
        let Some(idx) = parts.next().and_then(|p| p.parse::<usize>().ok()) else {
            tracing::debug!(%line, "dropping selection line with bad index");
            continue;
        };
        if idx >= options.len() {
            tracing::debug!(%line, idx, "dropping stale selection line");
            continue;
        }
        let rest: Vec<&str> = parts.collect();
        match (&options[idx].op, rest.as_slice()) {
            // Scalar count for swaps and optional equipment
            (op, [value]) if op.takes_count() => {
                if let Ok(n) = value.parse::<u32>() {
                    selections[idx] = Selection::Count(n);
                } else {
                    tracing::debug!(%line, "dropping non-integer count line");
                }
            }
            // A nested choice stores its label directly
            (Operation::NestedChoice { .. }, [value]) => {
                selections[idx] = Selection::Choice(value.to_string());
            }
            // Per-slot lines; the choice itself may contain '|'
            (Operation::PerNModelsSwap { .. }, [slot, choice_parts @ ..])
                if !choice_parts.is_empty() =>
            {
                let Ok(slot) = slot.parse::<usize>() else {
                    tracing::debug!(%line, "dropping slot line with bad slot index");
                    continue;
                };
                let choice = choice_parts.join("|");
                if let Selection::Slots(slots) = &mut selections[idx] {
                    if slots.len() <= slot {
                        slots.resize(slot + 1, String::new());
                    }
                    slots[slot] = choice;
                }
            }
            _ => tracing::debug!(%line, "dropping selection line of mismatched shape"),
        }
    }
    selections
}

/// Decode the legacy persisted form, where each stored line is either an
/// option's raw text (meaning "taken once") or `"<target> -> <option>"`
/// for a nested choice.
pub fn decode_legacy(active: &[String], options: &[ParsedOption]) -> Vec<Selection> {
    options
        .iter()
        .map(|opt| match &opt.op {
            Operation::NestedChoice { target, options } => {
                let chosen = options
                    .iter()
                    .find(|o| active.iter().any(|a| a == &format!("{target} -> {o}")));
                match chosen {
                    Some(o) => Selection::Choice(o.clone()),
                    None => Selection::Choice(DEFAULT_CHOICE.to_string()),
                }
            }
            Operation::SwapOne { .. }
            | Operation::SwapMany { .. }
            | Operation::AnyNumberSwap { .. } => {
                if active.iter().any(|a| a == &opt.text) {
                    Selection::Count(1)
                } else {
                    Selection::Count(0)
                }
            }
            other => Selection::default_for(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_option;

    fn options() -> Vec<ParsedOption> {
        [
            "The Boss Nob's big choppa can be replaced with 1 power klaw.",
            "For every 10 models in this unit, 1 Boy's slugga and choppa can be replaced with one of the following: 1 big shoota and 1 close combat weapon 1 rokkit launcha and 1 close combat weapon",
            "The Sergeant's chainsword can be replaced with one of the following: • 1 power fist • 1 power weapon",
        ]
        .iter()
        .map(|t| ParsedOption::new(*t, parse_option(t)))
        .collect()
    }

    #[test]
    fn test_round_trip() {
        let opts = options();
        let selections = vec![
            Selection::Count(1),
            Selection::Slots(vec![
                "1 big shoota and close combat weapon".to_string(),
                String::new(),
                "rokkit launcha and close combat weapon".to_string(),
            ]),
            Selection::Choice("1 power fist".to_string()),
        ];
        let lines = encode(&selections);
        assert_eq!(
            lines,
            vec![
                "w2|0|1".to_string(),
                "w2|1|0|1 big shoota and close combat weapon".to_string(),
                "w2|1|2|rokkit launcha and close combat weapon".to_string(),
                "w2|2|1 power fist".to_string(),
            ]
        );
        let decoded = decode(&lines, &opts);
        assert_eq!(decoded, selections);
    }

    #[test]
    fn test_decode_fills_defaults_when_no_lines() {
        let opts = options();
        let decoded = decode(&[], &opts);
        assert_eq!(decoded[0], Selection::Count(0));
        assert_eq!(decoded[1], Selection::Slots(vec![]));
        assert_eq!(decoded[2], Selection::Choice("Default".to_string()));
    }

    #[test]
    fn test_corrupt_lines_are_dropped_not_fatal() {
        let opts = options();
        let lines = vec![
            "w2|0|not-a-number".to_string(),
            "w2|99|1".to_string(),
            "garbage".to_string(),
            "w2".to_string(),
            "w2|0|1".to_string(),
        ];
        let decoded = decode(&lines, &opts);
        // The one valid line still decodes
        assert_eq!(decoded[0], Selection::Count(1));
        assert_eq!(decoded[1], Selection::Slots(vec![]));
    }

    #[test]
    fn test_slot_choice_may_contain_pipes() {
        let opts = options();
        let lines = vec!["w2|1|0|odd|label".to_string()];
        let decoded = decode(&lines, &opts);
        assert_eq!(decoded[1], Selection::Slots(vec!["odd|label".to_string()]));
    }

    #[test]
    fn test_decode_legacy_matches_raw_text_and_nested_arrows() {
        let opts = options();
        let active = vec![
            opts[0].text.clone(),
            "chainsword -> 1 power weapon".to_string(),
        ];
        let decoded = decode_legacy(&active, &opts);
        assert_eq!(decoded[0], Selection::Count(1));
        assert_eq!(decoded[1], Selection::Slots(vec![]));
        assert_eq!(decoded[2], Selection::Choice("1 power weapon".to_string()));
    }
}
