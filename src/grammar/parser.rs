//! Classifies one raw option sentence into a typed `Operation`
//!
//! The grammar is an ordered list of matchers tried top to bottom; the
//! first hit wins. Order matters: several patterns are textual
//! specializations of later, looser ones ("for every N models ..." is a
//! specialization of the generic possessive swap), so the tight patterns
//! must run first. The final matcher always succeeds and yields
//! `Unrecognized`, which keeps `parse_option` total.

use crate::grammar::Operation;
use crate::text::{normalize, split_items};
use once_cell::sync::Lazy;
use regex::Regex;

static PER_EQUIPPED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)for\s+every\s+(\d+)\s+models\s+in\s+this\s+unit,?\s+1\s+model\s+equipped\s+with\s+(.+?)\s+can\s+be\s+equipped\s+with\s+(.+)",
    )
    .unwrap()
});
static PER_POSSESSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)for\s+every\s+(\d+)\s+models\s+in\s+this\s+unit,?\s+(?:1\s+)?(\w+)'s\s+(.+?)\s+can\s+be\s+replaced\s+with\s+one\s+of\s+the\s+following\s*:\s*(.+)",
    )
    .unwrap()
});
static ANY_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)any\s+number\s+of\s+(.+?)\s+can\s+each\s+have\s+(?:their\s+)?(.+?)\s+replaced\s+with\s+(.+)",
    )
    .unwrap()
});
static POSSESSIVE_SWAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?:the\s+)?(.+?)'s\s+(.+?)\s+can\s+be\s+replaced\s+with\s+(.+)").unwrap()
});
static FALLBACK_SWAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:model's|unit's|this\s+model's?)\s+(.*?)\s+can\s+be\s+replaced\s+with\s+(?:1\s+)?(.*)",
    )
    .unwrap()
});
static EQUIP_ONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)this\s+model\s+can\s+be\s+equipped\s+with\s+(?:up\s+to\s+)?(?:1|one)\s+(.+?)(?:\.|$)",
    )
    .unwrap()
});
static EQUIP_UP_TO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)this\s+model\s+can\s+be\s+equipped\s+with\s+up\s+to\s+(\d+)\s+(.+?)(?:\.|$)")
        .unwrap()
});
static ONE_OF_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)one of the following\s*:\s*").unwrap());
static NESTED_TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:model's|unit's)\s+(.*?)\s+can be").unwrap());
static OPTION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+1\s+|\s+one\s+|\s*•\s*").unwrap());
static PAIR_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+1\s+|\s+one\s+").unwrap());
static BULLET_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*•\s*").unwrap());
static LEGACY_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s1\s|\sone\s").unwrap());
static ONE_OF_COLON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)one of the following:").unwrap());
static LEADING_ARTICLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:a|an)\s+").unwrap());
static LEADING_QTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:1|one)\s+").unwrap());
static QTY_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"1\s+\w+").unwrap());

/// Parse one raw option sentence. Total: anything the grammar does not
/// cover comes back as `Operation::Unrecognized` carrying the raw text.
pub fn parse_option(raw: &str) -> Operation {
    let t = normalize(raw);
    if t.is_empty() {
        return Operation::Unrecognized {
            text: raw.to_string(),
        };
    }

    let op = per_n_equipped(&t)
        .or_else(|| per_n_possessive(&t))
        .or_else(|| any_number_swap(&t))
        .or_else(|| possessive_swap(&t))
        .or_else(|| fallback_swap(&t))
        .or_else(|| equip_optional(&t))
        .or_else(|| legacy_nested(&t))
        .unwrap_or_else(|| Operation::Unrecognized {
            text: raw.to_string(),
        });
    tracing::debug!(?op, text = %t, "classified wargear option");
    op
}

/// Trim a split fragment down to an option label: outer punctuation and
/// stray bullet markers removed.
fn clean_fragment(fragment: &str) -> String {
    fragment
        .replace('•', "")
        .trim()
        .trim_matches(|c| c == ',' || c == '.')
        .trim()
        .to_string()
}

/// Pattern 1: "For every N models in this unit, 1 model equipped with X
/// can be equipped with Y" where Y is a single item or a "one of the
/// following" list.
fn per_n_equipped(t: &str) -> Option<Operation> {
    let caps = PER_EQUIPPED_RE.captures(t)?;
    // Absurdly large N still matches; it just yields zero slots
    let every_n: u32 = caps[1].parse().unwrap_or(u32::MAX);
    let removed_str = LEADING_ARTICLE_RE
        .replace(caps[2].trim().trim_matches('.'), "")
        .trim()
        .to_string();
    let rest = caps[3].trim().trim_matches('.').trim().to_string();
    let removed = split_items(&removed_str);

    let options: Vec<String> = if rest.to_lowercase().contains("one of the following") {
        let tail = ONE_OF_MARKER_RE.split(&rest).last().unwrap_or("").trim();
        OPTION_TOKEN_RE
            .split(tail)
            .map(clean_fragment)
            .filter(|o| o.len() > 2)
            .collect()
    } else if rest.is_empty() {
        Vec::new()
    } else {
        vec![rest]
    };

    if removed.is_empty() || options.is_empty() {
        return None;
    }
    Some(Operation::PerNModelsSwap {
        who: "model".to_string(),
        every_n,
        slots_per_n: 1,
        removed,
        options,
    })
}

/// Pattern 2: "For every N models in this unit, [1] X's A can be replaced
/// with one of the following: ...". Rulebook lists here split each option
/// across two fragments by the internal "and" ("big shoota" + "and close
/// combat weapon"), so fragments are re-paired two at a time.
fn per_n_possessive(t: &str) -> Option<Operation> {
    let caps = PER_POSSESSIVE_RE.captures(t)?;
    let every_n: u32 = caps[1].parse().unwrap_or(u32::MAX);
    let who = caps[2].trim().to_string();
    let removed = split_items(caps[3].trim());
    let rest = caps[4].trim();

    let fragments: Vec<String> = PAIR_TOKEN_RE
        .split(rest)
        .map(clean_fragment)
        .filter(|o| o.len() > 2)
        .collect();
    let options: Vec<String> = if fragments.len() >= 2 {
        (0..fragments.len() - 1)
            .step_by(2)
            .map(|i| format!("{} {}", fragments[i], fragments[i + 1]))
            .collect()
    } else {
        fragments
            .iter()
            .map(|o| LEADING_QTY_RE.replace(o, "").trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    };

    Some(Operation::PerNModelsSwap {
        who,
        every_n,
        slots_per_n: 1,
        removed,
        options,
    })
}

/// Pattern 3: "Any number of X can each have [their] A replaced with B"
fn any_number_swap(t: &str) -> Option<Operation> {
    let caps = ANY_NUMBER_RE.captures(t)?;
    Some(Operation::AnyNumberSwap {
        who: caps[1].trim().to_string(),
        removed: split_items(caps[2].trim()),
        added: split_items(caps[3].trim()),
    })
}

/// Pattern 4: "[The] X's A can be replaced with B" where B is either a
/// "one of the following" list (nested choice) or a plain swap of one or
/// several items.
fn possessive_swap(t: &str) -> Option<Operation> {
    let caps = POSSESSIVE_SWAP_RE.captures(t)?;
    let who = caps[1].trim().to_string();
    let left = caps[2].trim().to_string();
    let right = caps[3].trim().trim_matches('.').trim().to_string();

    if right.to_lowercase().contains("one of the following") {
        let removed = split_items(&left);
        let tail = ONE_OF_MARKER_RE
            .split(&right)
            .last()
            .unwrap_or("")
            .replace('\n', " ");
        let options: Vec<String> = BULLET_SPLIT_RE
            .split(tail.trim())
            .map(clean_fragment)
            .filter(|o| o.len() > 2)
            .collect();
        if !removed.is_empty() && !options.is_empty() {
            let target = if removed.len() == 1 {
                removed[0].clone()
            } else {
                left.clone()
            };
            return Some(Operation::NestedChoice { target, options });
        }
    }

    let removed = split_items(&left);
    let added = split_items(&right);
    if removed.is_empty() || added.is_empty() {
        return None;
    }
    let multi_hint = left.to_lowercase().contains(" and ")
        && (right.to_lowercase().contains(" and ") || QTY_ITEM_RE.is_match(&right));
    if !multi_hint && removed.len() == 1 && added.len() == 1 {
        Some(Operation::SwapOne {
            who,
            removed: removed.into_iter().next().unwrap(),
            added: added.into_iter().next().unwrap(),
        })
    } else {
        Some(Operation::SwapMany {
            who,
            removed,
            added,
        })
    }
}

/// Pattern 5: "model's|unit's|this model's A can be replaced with [1] B"
/// for sentences with no explicit "the X's" subject.
fn fallback_swap(t: &str) -> Option<Operation> {
    let caps = FALLBACK_SWAP_RE.captures(t)?;
    let removed = split_items(caps[1].trim());
    let added = split_items(caps[2].trim().trim_matches('.').trim());
    if removed.is_empty() || added.is_empty() {
        return None;
    }
    if removed.len() == 1 && added.len() == 1 {
        Some(Operation::SwapOne {
            who: "Model".to_string(),
            removed: removed.into_iter().next().unwrap(),
            added: added.into_iter().next().unwrap(),
        })
    } else {
        Some(Operation::SwapMany {
            who: "Model".to_string(),
            removed,
            added,
        })
    }
}

/// Patterns 6 and 7: "This model can be equipped with [up to] 1 X" and
/// "... with up to N X". The count is capped at 10 as a defensive limit,
/// not a rules value.
fn equip_optional(t: &str) -> Option<Operation> {
    if let Some(caps) = EQUIP_ONE_RE.captures(t) {
        let item = caps[1].trim().trim_matches('.').trim().to_string();
        if item.len() > 1 {
            return Some(Operation::EquipOptional {
                added: vec![item],
                max: 1,
            });
        }
    }
    if let Some(caps) = EQUIP_UP_TO_RE.captures(t) {
        let n: u32 = caps[1].parse().unwrap_or(u32::MAX);
        let item = caps[2].trim().trim_matches('.').trim().to_string();
        if n >= 1 && item.len() > 1 {
            return Some(Operation::EquipOptional {
                added: vec![item],
                max: n.min(10),
            });
        }
    }
    None
}

/// Pattern 8: any leftover sentence containing "one of the following:".
/// The target falls back to "Equipment" when no "model's X can be"
/// preamble is present.
fn legacy_nested(t: &str) -> Option<Operation> {
    if !t.to_lowercase().contains("one of the following:") {
        return None;
    }
    let mut parts = ONE_OF_COLON_RE.splitn(t, 2);
    let header = parts.next().unwrap_or("");
    let tail = parts.next().unwrap_or("");

    let options: Vec<String> = LEGACY_TOKEN_RE
        .split(tail)
        .map(clean_fragment)
        .filter(|o| o.len() > 2)
        .collect();
    let target = NESTED_TARGET_RE
        .captures(header)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "Equipment".to_string());

    Some(Operation::NestedChoice { target, options })
}
