//! Default-loadout sentence parsing
//!
//! Loadout text reads like 'The Boss Nob is equipped with: slugga; big
//! choppa. Every Boy is equipped with: slugga; choppa.' - one sentence per
//! model role. Sentences outside that shape are dropped; a loadout where
//! nothing matches simply yields no lines.

use crate::text::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SENTENCE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s+((?:Every|The|Each)\s+)").unwrap());
static EQUIPPED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:The\s+)?(.+?)\s+is\s+equipped\s+with\s*:\s*(.+)").unwrap()
});
static WEAPON_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,]").unwrap());

/// One parsed loadout sentence: a model role and the weapons every such
/// model carries. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutLine {
    /// Free text, e.g. "Boss Nob" or "Every model"
    pub role: String,
    pub weapons: Vec<String>,
}

/// Parse a unit's default-loadout text into ordered lines.
///
/// Splits on newlines; when the source text was concatenated without line
/// breaks, sentences are split heuristically before "Every"/"The"/"Each"
/// following a period.
pub fn parse_loadout(text: &str) -> Vec<LoadoutLine> {
    let s = normalize(text);
    if s.is_empty() {
        return Vec::new();
    }
    let s = if s.contains('\n') {
        s
    } else {
        SENTENCE_BREAK_RE.replace_all(&s, ".\n$1").into_owned()
    };

    let mut out = Vec::new();
    for line in s.lines() {
        let line = line.trim().trim_matches('.').trim();
        if line.is_empty() {
            continue;
        }
        let Some(caps) = EQUIPPED_RE.captures(line) else {
            continue;
        };
        let role = caps[1].trim().to_string();
        let weapons: Vec<String> = WEAPON_SEP_RE
            .split(caps[2].trim())
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if !role.is_empty() && !weapons.is_empty() {
            out.push(LoadoutLine { role, weapons });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_two_sentences() {
        let lines = parse_loadout(
            "The Boss Nob is equipped with: slugga; big choppa. Every Boy is equipped with: slugga; choppa.",
        );
        assert_eq!(
            lines,
            vec![
                LoadoutLine {
                    role: "Boss Nob".to_string(),
                    weapons: vec!["slugga".to_string(), "big choppa".to_string()],
                },
                LoadoutLine {
                    role: "Boy".to_string(),
                    weapons: vec!["slugga".to_string(), "choppa".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_splits_on_br_tags() {
        let lines = parse_loadout(
            "The Sergeant is equipped with: boltgun.<br>Every other model is equipped with: lasgun.",
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].role, "Every other model");
    }

    #[test]
    fn test_comma_separated_weapons() {
        let lines = parse_loadout("Every model is equipped with: lasgun, bayonet");
        assert_eq!(
            lines[0].weapons,
            vec!["lasgun".to_string(), "bayonet".to_string()]
        );
    }

    #[test]
    fn test_non_matching_sentences_are_dropped() {
        let lines = parse_loadout(
            "This unit fights bravely. The Champion is equipped with: power sword.",
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].role, "Champion");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_loadout("").is_empty());
        assert!(parse_loadout("   ").is_empty());
        assert!(parse_loadout("No equipment here.").is_empty());
    }
}
