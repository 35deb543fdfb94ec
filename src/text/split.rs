//! Item-list splitting for "A and B and C" phrases

use once_cell::sync::Lazy;
use regex::Regex;

static AND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+and\s+").unwrap());
static LEADING_QTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:1|one)\s+").unwrap());

/// Split "1 big shoota and 1 close combat weapon" or "slugga and choppa"
/// into canonical item names. Leading "1 "/"one " quantity tokens are
/// stripped; fragments of a single character or less are dropped. Order
/// is preserved. Empty input yields an empty list.
pub fn split_items(phrase: &str) -> Vec<String> {
    let s = phrase
        .trim()
        .trim_matches(|c| c == '.' || c == ',')
        .trim();
    if s.is_empty() {
        return Vec::new();
    }
    AND_RE
        .split(s)
        .filter_map(|part| {
            let item = LEADING_QTY_RE.replace(part.trim(), "").trim().to_string();
            if item.len() > 1 {
                Some(item)
            } else {
                None
            }
        })
        .collect()
}
