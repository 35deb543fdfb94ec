//! Text normalization for rulebook prose
//!
//! Upstream option and loadout text arrives as HTML fragments with
//! inconsistent entities, curly apostrophes and the occasional
//! double-encoded mojibake. Everything downstream (the grammar, the
//! loadout parser) matches against the normalized form, so this is the
//! single entry point for raw text. Best-effort on malformed input;
//! never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</br>").unwrap());
static LI_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</li>\s*").unwrap());
static LI_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li[^>]*>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static NUM_ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]{1,6}|[0-9]{1,7});").unwrap());

/// Mojibake sequences seen in stored rulebook text, all of which stand for
/// an apostrophe. Longest first so partial overlaps rewrite cleanly.
const APOSTROPHE_MOJIBAKE: [&str; 3] = ["Ã¢â‚¬â„¢", "â€™", "ΓÇÖ"];

/// Normalize one raw text blob: strip markup, decode entities, repair
/// apostrophes, collapse whitespace. Line breaks are preserved (each
/// `<br>`/`</li>` becomes one) and blank lines are dropped.
pub fn normalize(raw: &str) -> String {
    let s = BR_RE.replace_all(raw, "\n");
    // List items become bulleted lines so the grammar's bullet splitting
    // still sees option boundaries after tags are stripped.
    let s = LI_CLOSE_RE.replace_all(&s, "\n");
    let s = LI_OPEN_RE.replace_all(&s, "\u{2022} ");
    let s = TAG_RE.replace_all(&s, "");
    let s = decode_named_entities(&s);
    let s = decode_numeric_entities(&s);
    let s = repair_apostrophes(&s);

    s.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_named_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

fn decode_numeric_entities(s: &str) -> String {
    NUM_ENTITY_RE
        .replace_all(s, |caps: &regex::Captures| {
            let body = &caps[1];
            let parsed = if let Some(hex) = body.strip_prefix('x') {
                u32::from_str_radix(hex, 16)
            } else {
                body.parse::<u32>()
            };
            match parsed.ok().and_then(char::from_u32) {
                Some(c) => c.to_string(),
                // Undecodable entity: leave it in place rather than drop text
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn repair_apostrophes(s: &str) -> String {
    let mut out = s.to_string();
    for seq in APOSTROPHE_MOJIBAKE {
        out = out.replace(seq, "'");
    }
    out.replace('\u{2019}', "'").replace('\u{2018}', "'")
}
