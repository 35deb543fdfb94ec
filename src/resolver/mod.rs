//! Applies wargear selections to base weapon counts
//!
//! Operations are applied strictly in list order so results are
//! deterministic and line up with the positional selection codec. Counts
//! clamp at zero on subtraction: you cannot remove more copies than exist,
//! and irregular rule text must never produce a negative count.

use crate::core::{weapon_names_match, ParsedOption, WeaponCounts};
use crate::grammar::Operation;
use crate::selection::{Selection, DEFAULT_CHOICE};
use crate::text::split_items;

/// Subtract `n` from the first existing key matching each weapon name,
/// clamped at zero.
fn subtract(counts: &mut WeaponCounts, weapons: &[String], n: u32) {
    for weapon in weapons {
        let matched = counts
            .keys()
            .find(|k| weapon_names_match(k, weapon))
            .cloned();
        if let Some(key) = matched {
            let entry = counts.entry(key).or_insert(0);
            *entry = entry.saturating_sub(n);
        }
    }
}

/// Add `n` to the first existing key matching each weapon name, inserting
/// a new key when nothing matches.
fn add(counts: &mut WeaponCounts, weapons: &[String], n: u32) {
    for weapon in weapons {
        let weapon = weapon.trim();
        if weapon.is_empty() {
            continue;
        }
        let matched = counts
            .keys()
            .find(|k| weapon_names_match(k, weapon))
            .cloned();
        let key = matched.unwrap_or_else(|| weapon.to_string());
        let entry = counts.entry(key).or_insert(0);
        *entry = entry.saturating_add(n);
    }
}

/// Resolve final weapon counts from the base map, the unit's options and
/// the user's selections. Pure; `base` is not mutated. A selections list
/// shorter than the options list means "no effect" for the tail, and a
/// selection whose shape does not fit its operation is ignored.
pub fn resolve(
    base: &WeaponCounts,
    options: &[ParsedOption],
    selections: &[Selection],
    quantity: u32,
) -> WeaponCounts {
    let mut counts = base.clone();
    for (idx, opt) in options.iter().enumerate() {
        let Some(sel) = selections.get(idx) else {
            continue;
        };
        match (&opt.op, sel) {
            (Operation::SwapOne { removed, added, .. }, Selection::Count(n)) if *n > 0 => {
                subtract(&mut counts, std::slice::from_ref(removed), *n);
                add(&mut counts, std::slice::from_ref(added), *n);
            }
            (Operation::SwapMany { removed, added, .. }, Selection::Count(n)) if *n > 0 => {
                subtract(&mut counts, removed, *n);
                add(&mut counts, added, *n);
            }
            (Operation::AnyNumberSwap { removed, added, .. }, Selection::Count(n)) if *n > 0 => {
                subtract(&mut counts, removed, *n);
                add(&mut counts, added, *n);
            }
            (
                Operation::PerNModelsSwap {
                    every_n,
                    slots_per_n,
                    removed,
                    ..
                },
                Selection::Slots(slot_choices),
            ) => {
                // Degenerate parses fall back to the common rulebook ratio
                let every_n = if *every_n == 0 { 10 } else { *every_n };
                let slots_per_n = if *slots_per_n == 0 { 1 } else { *slots_per_n };
                let slots = (quantity / every_n) * slots_per_n;
                for choice in slot_choices.iter().take(slots as usize) {
                    if choice.is_empty() {
                        continue;
                    }
                    let added = split_items(choice);
                    subtract(&mut counts, removed, 1);
                    add(&mut counts, &added, 1);
                }
            }
            (Operation::NestedChoice { target, .. }, Selection::Choice(choice))
                if !choice.is_empty() && choice.as_str() != DEFAULT_CHOICE =>
            {
                subtract(&mut counts, std::slice::from_ref(target), 1);
                add(&mut counts, &split_items(choice), 1);
            }
            (Operation::EquipOptional { added, .. }, Selection::Count(n)) if *n > 0 => {
                add(&mut counts, added, *n);
            }
            _ => {}
        }
        tracing::debug!(idx, op = ?opt.op, "applied wargear selection");
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_option;
    use crate::loadout::{parse_loadout, project_base_counts};

    fn boyz_base(quantity: u32) -> WeaponCounts {
        let lines = parse_loadout(
            "The Boss Nob is equipped with: slugga; big choppa. Every Boy is equipped with: slugga; choppa.",
        );
        project_base_counts(&lines, quantity)
    }

    fn opt(text: &str) -> ParsedOption {
        ParsedOption::new(text, parse_option(text))
    }

    #[test]
    fn test_swap_one_moves_count() {
        let base = boyz_base(10);
        let options = vec![opt("The Boss Nob's big choppa can be replaced with 1 power klaw.")];
        let counts = resolve(&base, &options, &[Selection::Count(1)], 10);
        assert_eq!(counts.get("big choppa"), Some(&0));
        assert_eq!(counts.get("power klaw"), Some(&1));
        assert_eq!(counts.get("slugga"), Some(&10));
        assert_eq!(counts.get("choppa"), Some(&9));
    }

    #[test]
    fn test_missing_selection_means_no_effect() {
        let base = boyz_base(10);
        let options = vec![opt("The Boss Nob's big choppa can be replaced with 1 power klaw.")];
        let counts = resolve(&base, &options, &[], 10);
        assert_eq!(counts, base);
    }

    #[test]
    fn test_subtraction_clamps_at_zero() {
        let base = boyz_base(10);
        let options = vec![opt("The Boss Nob's big choppa can be replaced with 1 power klaw.")];
        let counts = resolve(&base, &options, &[Selection::Count(5)], 10);
        assert_eq!(counts.get("big choppa"), Some(&0));
        assert_eq!(counts.get("power klaw"), Some(&5));
    }

    #[test]
    fn test_per_n_slots_formula() {
        let lines = parse_loadout("Every model is equipped with: slugga; choppa.");
        let base = project_base_counts(&lines, 25);
        let options = vec![opt(
            "For every 10 models in this unit, 1 Boy's slugga and choppa can be replaced with one of the following: 1 big shoota and 1 close combat weapon 1 rokkit launcha and 1 close combat weapon",
        )];
        // floor(25 / 10) = 2 slots; the third choice is ignored
        let sel = Selection::Slots(vec![
            "1 big shoota and close combat weapon".to_string(),
            "rokkit launcha and close combat weapon".to_string(),
            "1 big shoota and close combat weapon".to_string(),
        ]);
        let counts = resolve(&base, &options, &[sel], 25);
        assert_eq!(counts.get("slugga"), Some(&23));
        assert_eq!(counts.get("choppa"), Some(&23));
        assert_eq!(counts.get("big shoota"), Some(&1));
        assert_eq!(counts.get("rokkit launcha"), Some(&1));
        assert_eq!(counts.get("close combat weapon"), Some(&2));
    }

    #[test]
    fn test_nested_choice_default_is_inert() {
        let base = boyz_base(10);
        let options = vec![opt(
            "The Boss Nob's big choppa can be replaced with one of the following: • 1 power klaw • 1 big choppa",
        )];
        let counts = resolve(
            &base,
            &options,
            &[Selection::Choice("Default".to_string())],
            10,
        );
        assert_eq!(counts, base);
    }

    #[test]
    fn test_nested_choice_applies_once() {
        let base = boyz_base(10);
        let options = vec![opt(
            "The Boss Nob's big choppa can be replaced with one of the following: • 1 power klaw • 1 power stabba",
        )];
        let counts = resolve(
            &base,
            &options,
            &[Selection::Choice("1 power klaw".to_string())],
            10,
        );
        assert_eq!(counts.get("big choppa"), Some(&0));
        assert_eq!(counts.get("power klaw"), Some(&1));
    }

    #[test]
    fn test_equip_optional_adds_without_subtracting() {
        let base = boyz_base(10);
        let options = vec![opt("This model can be equipped with up to 3 grot oilers.")];
        let counts = resolve(&base, &options, &[Selection::Count(2)], 10);
        assert_eq!(counts.get("grot oilers"), Some(&2));
        assert_eq!(counts.get("slugga"), Some(&10));
    }

    #[test]
    fn test_unrecognized_has_no_effect() {
        let base = boyz_base(10);
        let options = vec![opt("This unit may drink tea.")];
        let counts = resolve(&base, &options, &[Selection::Count(3)], 10);
        assert_eq!(counts, base);
    }

    #[test]
    fn test_mismatched_selection_shape_is_ignored() {
        let base = boyz_base(10);
        let options = vec![opt("The Boss Nob's big choppa can be replaced with 1 power klaw.")];
        let counts = resolve(
            &base,
            &options,
            &[Selection::Choice("1 power klaw".to_string())],
            10,
        );
        assert_eq!(counts, base);
    }

    #[test]
    fn test_fuzzy_added_name_merges_into_existing_key() {
        let base = boyz_base(10);
        let options = vec![opt("The Boss Nob's slugga can be replaced with 1 choppa.")];
        let counts = resolve(&base, &options, &[Selection::Count(1)], 10);
        // "choppa" lands on the first key it fuzz-matches in map order,
        // which is "big choppa" under the containment policy. Pinned so a
        // change to the identity rule is deliberate.
        assert_eq!(counts.get("slugga"), Some(&9));
        assert_eq!(counts.get("big choppa"), Some(&2));
        assert_eq!(counts.get("choppa"), Some(&9));
    }
}
