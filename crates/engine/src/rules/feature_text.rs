//! Rewrites ability names and descriptions after a tier change.
//!
//! Abilities can carry damage in three places: nested actions, the
//! `Horde (<formula>)` name convention and the `Minion (<N>)` name
//! convention. Every formula that moves becomes a substitution applied to
//! the ability's own description and its actions' descriptions.
//!
//! Text substitution is heuristic. Formula text ("2d6+3") is replaced
//! wherever it appears verbatim; a bare one- or two-digit number is only
//! replaced inside bold/emphasis markup, and can still hit an unrelated
//! emphasized number.

use std::sync::OnceLock;

use regex_lite::{Captures, Regex};
use tierforge_domain::{
    AbilityChange, AbilityChangeKind, AbilityOverride, AbilityRecord, ActionChange, Change,
    DamageFormula,
};

use super::damage_rescaler::{diff, DamageRescaler, DamageSource};
use super::range_roller::roll_uniform;
use crate::infrastructure::ports::RandomPort;

static HORDE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static MINION_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static SHORT_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn horde_name_regex() -> &'static Regex {
    HORDE_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?i:horde)\s*\((.+)\)\s*$").expect("HORDE_NAME_REGEX pattern is invalid")
    })
}

fn minion_name_regex() -> &'static Regex {
    MINION_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?i:minion)\s*\((\d+)\)\s*$")
            .expect("MINION_NAME_REGEX pattern is invalid")
    })
}

fn short_number_regex() -> &'static Regex {
    SHORT_NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^\d{1,2}$").expect("SHORT_NUMBER_REGEX pattern is invalid")
    })
}

/// Embedded formula text of a `Horde (...)` ability name.
pub fn horde_formula(name: &str) -> Option<&str> {
    horde_name_regex()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Embedded threshold of a `Minion (N)` ability name.
pub fn minion_threshold(name: &str) -> Option<i32> {
    minion_name_regex()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Description written onto a minion feature whose old threshold could not
/// be found in its text.
pub fn minion_description(threshold: i32) -> String {
    format!(
        "<p>This adversary is defeated when they take any damage. For every <strong>{}</strong> \
         damage a PC deals to this adversary, defeat an additional Minion within range the \
         attack would succeed against.</p>",
        threshold
    )
}

fn emphasized_number_patterns(number: &str) -> [String; 2] {
    let number = regex_lite::escape(number);
    [
        format!(r"(<(?:strong|b|em)(?:\s[^>]*)?>\s*){}(\s*</(?:strong|b|em)>)", number),
        format!(r"(\*\*|__){}(\*\*|__)", number),
    ]
}

/// Whether `text` holds `number` wrapped in bold/emphasis markup.
pub fn has_emphasized_number(text: &str, number: &str) -> bool {
    emphasized_number_patterns(number)
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .any(|re| re.is_match(text))
}

/// One replacement found in the original text.
struct Replacement {
    start: usize,
    end: usize,
    text: String,
}

/// Spans of `text` that `change` rewrites.
fn replacements(text: &str, change: &Change<String>) -> Vec<Replacement> {
    if change.from.is_empty() || change.from == change.to {
        return Vec::new();
    }
    if short_number_regex().is_match(&change.from) {
        return emphasized_number_patterns(&change.from)
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .flat_map(|re| {
                re.captures_iter(text)
                    .filter_map(|caps: Captures<'_>| {
                        let whole = caps.get(0)?;
                        Some(Replacement {
                            start: whole.start(),
                            end: whole.end(),
                            text: format!("{}{}{}", &caps[1], change.to, &caps[2]),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
    }
    text.match_indices(change.from.as_str())
        .map(|(start, found)| Replacement {
            start,
            end: start + found.len(),
            text: change.to.clone(),
        })
        .collect()
}

/// Apply one formula substitution to free text.
pub fn substitute(text: &str, change: &Change<String>) -> String {
    substitute_all(text, std::slice::from_ref(change))
}

/// Apply every substitution in one pass over the original text, so a
/// replacement is never rewritten by a later change. Where matches
/// overlap, the earliest wins, then the longest, then the earlier-registered
/// change.
pub fn substitute_all(text: &str, changes: &[Change<String>]) -> String {
    let mut found: Vec<(usize, Replacement)> = changes
        .iter()
        .enumerate()
        .flat_map(|(order, change)| {
            replacements(text, change)
                .into_iter()
                .map(move |r| (order, r))
        })
        .collect();
    if found.is_empty() {
        return text.to_string();
    }
    found.sort_by_key(|(order, r)| (r.start, std::cmp::Reverse(r.end), *order));

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for (_, replacement) in found {
        if replacement.start < cursor {
            continue;
        }
        result.push_str(&text[cursor..replacement.start]);
        result.push_str(&replacement.text);
        cursor = replacement.end;
    }
    result.push_str(&text[cursor..]);
    result
}

/// Everything the rewriter needs to know about the target tier.
pub struct FeatureContext<'a> {
    pub rescaler: DamageRescaler,
    /// Source for nested action damage
    pub damage: DamageSource<'a>,
    /// Source for formulas embedded in `Horde (...)` names
    pub horde_damage: DamageSource<'a>,
    pub minion_feature_range: Option<&'a str>,
    /// Creature-level damage changes that horde names may reuse
    pub known_changes: &'a [Change<String>],
    pub rng: &'a dyn RandomPort,
}

/// Outcome for one ability: the change (if any) and its log lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureRewrite {
    pub change: Option<AbilityChange>,
    pub log: Vec<String>,
}

fn register(substitutions: &mut Vec<Change<String>>, change: Change<String>) {
    if !substitutions.iter().any(|s| s.from == change.from) {
        substitutions.push(change);
    }
}

/// Rescale one ability's damage and rewrite its text.
pub fn rewrite_ability(
    ability: &AbilityRecord,
    manual: Option<&AbilityOverride>,
    ctx: &FeatureContext<'_>,
) -> FeatureRewrite {
    let mut change = AbilityChange::new(ability.id);
    let mut log = Vec::new();
    let mut substitutions: Vec<Change<String>> = Vec::new();
    let mut current_name = ability.name.clone();
    let mut description = ability.description.clone();
    let manual_damage = manual.and_then(|m| m.damage);

    // Nested action damage
    let mut action_damage: Vec<Option<Change<String>>> = Vec::with_capacity(ability.actions.len());
    for action in &ability.actions {
        let Some(text) = action.damage.as_deref() else {
            action_damage.push(None);
            continue;
        };
        let outcome = match manual_damage {
            Some(formula) => DamageFormula::parse(text)
                .map(|current| diff(text, &current, &formula)),
            None => ctx.rescaler.rescale_text(text, ctx.damage, ctx.rng),
        };
        match outcome {
            Ok(Some(moved)) => {
                log.push(format!("{}: {} -> {}", ability.name, moved.from, moved.to));
                register(&mut substitutions, moved.clone());
                change.tag(AbilityChangeKind::Damage);
                action_damage.push(Some(moved));
            }
            Ok(None) => action_damage.push(None),
            Err(e) => {
                tracing::warn!(ability = %ability.name, damage = %text, error = %e, "Skipping unparsable action damage");
                log.push(format!(
                    "{}: skipped damage '{}' ({})",
                    ability.name, text, e
                ));
                action_damage.push(None);
            }
        }
    }

    if let Some(embedded) = horde_formula(&ability.name) {
        let resolved = if let Some(formula) = manual_damage {
            Some(formula.display())
        } else if let Some(known) = substitutions
            .iter()
            .chain(ctx.known_changes.iter())
            .find(|c| c.from == embedded)
        {
            Some(known.to.clone())
        } else {
            match ctx.rescaler.rescale_text(embedded, ctx.horde_damage, ctx.rng) {
                Ok(moved) => moved.map(|c| c.to),
                Err(e) => {
                    tracing::warn!(ability = %ability.name, error = %e, "Skipping unparsable horde formula");
                    log.push(format!(
                        "{}: skipped horde damage '{}' ({})",
                        ability.name, embedded, e
                    ));
                    None
                }
            }
        };
        if let Some(next) = resolved.filter(|next| next != embedded) {
            let renamed = format!("Horde ({})", next);
            log.push(format!("{} -> {}", ability.name, renamed));
            register(&mut substitutions, Change::new(embedded.to_string(), next));
            change.tag(AbilityChangeKind::NameHorde);
            current_name = renamed;
        }
    } else if let Some(threshold) = minion_threshold(&ability.name) {
        match ctx.minion_feature_range.and_then(|r| roll_uniform(r, ctx.rng)) {
            Some(next) if next != threshold => {
                let renamed = format!("Minion ({})", next);
                log.push(format!("{} -> {}", ability.name, renamed));
                let old = threshold.to_string();
                if has_emphasized_number(&description, &old) {
                    register(&mut substitutions, Change::new(old, next.to_string()));
                } else {
                    description = minion_description(next);
                }
                change.tag(AbilityChangeKind::NameMinion);
                current_name = renamed;
            }
            Some(_) => {}
            None => {
                log.push(format!(
                    "{}: skipped minion threshold (no feature range for this tier)",
                    ability.name
                ));
            }
        }
    }

    if let Some(name) = manual.and_then(|m| m.name.as_deref()) {
        if name != current_name {
            log.push(format!("{} -> {}", current_name, name));
            change.tag(AbilityChangeKind::NameOverride);
            current_name = name.to_string();
        }
    }
    if current_name != ability.name {
        change.name = Some(Change::new(ability.name.clone(), current_name));
    }

    let description = substitute_all(&description, &substitutions);
    if description != ability.description {
        change.description = Some(description);
    }

    for (action, damage) in ability.actions.iter().zip(action_damage) {
        let rewritten = substitute_all(&action.description, &substitutions);
        let description = (rewritten != action.description).then_some(rewritten);
        if damage.is_some() || description.is_some() {
            change.actions.push(ActionChange {
                action_id: action.id,
                damage,
                description,
            });
        }
    }

    FeatureRewrite {
        change: (!change.is_empty()).then_some(change),
        log,
    }
}
