//! Produces the full change-set for one creature moving between tiers.
//!
//! Order matters: stats, then creature-level damage, then ability text
//! (which reuses the damage changes), then suggested abilities.

use std::sync::{Arc, OnceLock};

use regex_lite::Regex;
use thiserror::Error;
use tierforge_domain::{
    AbilityAddition, Archetype, BenchmarkCatalog, Change, CreatureSnapshot, DamageFormula,
    ExperienceChange, RescaleOverrides, RescaleResult, SpecialAbility, Thresholds, Tier,
    TierBenchmark,
};

use super::damage_rescaler::{DamageRescaler, DamageSource};
use super::feature_text::{rewrite_ability, FeatureContext};
use super::range_roller::{parse_pair, roll_signed, roll_uniform};
use crate::infrastructure::ports::RandomPort;

static TIER_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tier_tag_regex() -> &'static Regex {
    TIER_TAG_REGEX.get_or_init(|| {
        Regex::new(r"\s*\(T\d+\)\s*$").expect("TIER_TAG_REGEX pattern is invalid")
    })
}

/// Placeholder used in benchmark suggestion lists.
const RELENTLESS_PLACEHOLDER: &str = "Relentless (X)";
const NEW_EXPERIENCE_NAME: &str = "New Experience";
const EXPERIENCE_MIN: i32 = 2;
const EXPERIENCE_MAX: i32 = 5;

/// Why a creature could not be rescaled at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RescaleError {
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),
    #[error("No {archetype} benchmark for tier {tier}")]
    MissingTierBenchmark { archetype: Archetype, tier: Tier },
}

/// Feature gates for the optional rescale steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescaleOptions {
    pub scale_experiences: bool,
    pub add_suggested_ability: bool,
}

impl Default for RescaleOptions {
    fn default() -> Self {
        Self {
            scale_experiences: true,
            add_suggested_ability: true,
        }
    }
}

/// Replace a trailing ` (T<n>)` tag, or append one.
pub fn retag_name(name: &str, tier: Tier) -> String {
    let base = tier_tag_regex().replace(name, "");
    format!("{} (T{})", base, tier)
}

/// Rescales creatures against a benchmark catalog.
pub struct ActorRescaler {
    catalog: Arc<BenchmarkCatalog>,
    random: Arc<dyn RandomPort>,
    options: RescaleOptions,
}

impl ActorRescaler {
    pub fn new(
        catalog: Arc<BenchmarkCatalog>,
        random: Arc<dyn RandomPort>,
        options: RescaleOptions,
    ) -> Self {
        Self {
            catalog,
            random,
            options,
        }
    }

    /// Compute the diff for moving `snapshot` to `target`.
    ///
    /// `Ok(None)` when the creature is already at `target`.
    pub fn rescale(
        &self,
        snapshot: &CreatureSnapshot,
        target: Tier,
        overrides: &RescaleOverrides,
    ) -> Result<Option<RescaleResult>, RescaleError> {
        if target == snapshot.tier {
            tracing::debug!(actor = %snapshot.id, tier = %target, "Tier unchanged, nothing to rescale");
            return Ok(None);
        }

        let archetype: Archetype = snapshot
            .archetype
            .parse()
            .map_err(|_| RescaleError::UnknownArchetype(snapshot.archetype.clone()))?;
        if !self.catalog.has_archetype(archetype) {
            return Err(RescaleError::UnknownArchetype(snapshot.archetype.clone()));
        }
        let bench = self
            .catalog
            .get(archetype, target)
            .ok_or(RescaleError::MissingTierBenchmark {
                archetype,
                tier: target,
            })?;

        let mut result = RescaleResult::new(snapshot.tier, target);
        result
            .log
            .push(format!("Tier: {} -> {}", snapshot.tier, target));

        let name = retag_name(&snapshot.name, target);
        if name != snapshot.name {
            result
                .log
                .push(format!("Name: {} -> {}", snapshot.name, name));
            result.name = Some(Change::new(snapshot.name.clone(), name));
        }

        self.rescale_stats(snapshot, bench, overrides, &mut result);
        self.rescale_damage(snapshot, archetype, bench, overrides, &mut result);
        if self.options.scale_experiences {
            self.shift_experiences(snapshot, target, &mut result);
        }
        self.rewrite_abilities(snapshot, archetype, bench, overrides, &mut result);
        if self.options.add_suggested_ability && target > snapshot.tier {
            self.suggest_abilities(snapshot, target, bench, overrides, &mut result);
        }

        tracing::info!(
            actor = %snapshot.id,
            archetype = %archetype,
            from = %snapshot.tier,
            to = %target,
            abilities = result.abilities.len(),
            "Rescaled adversary"
        );
        Ok(Some(result))
    }

    fn rescale_stats(
        &self,
        snapshot: &CreatureSnapshot,
        bench: &TierBenchmark,
        overrides: &RescaleOverrides,
        result: &mut RescaleResult,
    ) {
        let rng = self.random.as_ref();
        let log = &mut result.log;

        result.stats.difficulty = stat_change(
            "Difficulty",
            snapshot.difficulty,
            overrides.difficulty,
            || roll_uniform(&bench.difficulty, rng),
            log,
        );
        result.stats.hp_max = stat_change(
            "HP",
            snapshot.hp_max,
            overrides.hp,
            || roll_uniform(&bench.hp, rng),
            log,
        );
        result.stats.reset_hp = result.stats.hp_max.is_some();
        result.stats.stress_max = stat_change(
            "Stress",
            snapshot.stress_max,
            overrides.stress,
            || roll_uniform(&bench.stress, rng),
            log,
        );
        result.stats.attack_modifier = stat_change(
            "Attack",
            snapshot.attack.modifier,
            overrides.attack_modifier,
            || roll_signed(&bench.attack_modifier, rng),
            log,
        );

        let bounds = bench
            .thresholds
            .as_ref()
            .and_then(|t| Some((parse_pair(&t.min)?, parse_pair(&t.max)?)));
        if bench.thresholds.is_some() && bounds.is_none() {
            tracing::warn!("Unreadable threshold ranges in benchmark");
            log.push("Thresholds: skipped (unreadable benchmark range)".to_string());
        }
        // Major and severe are sampled independently from their own bounds.
        let major = overrides.major_threshold.or_else(|| {
            bounds.map(|((lo, _), (hi, _))| rng.gen_range(lo.min(hi), lo.max(hi)))
        });
        let severe = overrides.severe_threshold.or_else(|| {
            bounds.map(|((_, lo), (_, hi))| rng.gen_range(lo.min(hi), lo.max(hi)))
        });
        if let (Some(major), Some(severe)) = (major, severe) {
            let next = Thresholds { major, severe };
            if major != 0 && severe != 0 && next != snapshot.thresholds {
                log.push(format!(
                    "Thresholds: {}/{} -> {}/{}",
                    snapshot.thresholds.major, snapshot.thresholds.severe, major, severe
                ));
                result.stats.thresholds = Some(Change::new(snapshot.thresholds, next));
            }
        }
    }

    fn rescale_damage(
        &self,
        snapshot: &CreatureSnapshot,
        archetype: Archetype,
        bench: &TierBenchmark,
        overrides: &RescaleOverrides,
        result: &mut RescaleResult,
    ) {
        let rescaler = DamageRescaler::new(snapshot.tier, result.tier.to);

        result.damage.primary = self.damage_change(
            "Damage",
            &snapshot.attack.damage,
            overrides.damage,
            &rescaler,
            primary_source(archetype, bench),
            &mut result.log,
        );

        let has_halved_table = !bench.halved_damage_rolls.is_empty();
        if let Some(halved) = snapshot.attack.halved_damage.as_deref() {
            if has_halved_table || overrides.halved_damage.is_some() {
                result.damage.halved = self.damage_change(
                    "Halved damage",
                    halved,
                    overrides.halved_damage,
                    &rescaler,
                    DamageSource::Options(&bench.halved_damage_rolls),
                    &mut result.log,
                );
            }
        }
    }

    fn damage_change(
        &self,
        label: &str,
        text: &str,
        manual: Option<DamageFormula>,
        rescaler: &DamageRescaler,
        source: DamageSource<'_>,
        log: &mut Vec<String>,
    ) -> Option<Change<String>> {
        let change = match manual {
            Some(formula) => {
                let current = DamageFormula::parse(text)
                    .map(|f| f.display())
                    .unwrap_or_else(|_| text.trim().to_string());
                let to = formula.display();
                (to != current).then(|| Change::new(text.trim().to_string(), to))
            }
            None => match rescaler.rescale_text(text, source, self.random.as_ref()) {
                Ok(change) => change,
                Err(e) => {
                    tracing::warn!(field = label, damage = %text, error = %e, "Skipping malformed damage formula");
                    log.push(format!("{}: skipped malformed formula '{}' ({})", label, text, e));
                    return None;
                }
            },
        };
        if let Some(change) = &change {
            log.push(format!("{}: {} -> {}", label, change.from, change.to));
        }
        change
    }

    fn shift_experiences(&self, snapshot: &CreatureSnapshot, target: Tier, result: &mut RescaleResult) {
        let steps = snapshot.tier.steps_to(target);
        for experience in &snapshot.experiences {
            let next = (experience.value + steps).clamp(EXPERIENCE_MIN, EXPERIENCE_MAX);
            if next != experience.value {
                result.log.push(format!(
                    "Experience {}: {:+} -> {:+}",
                    experience.name, experience.value, next
                ));
                result.experiences.push(ExperienceChange {
                    name: experience.name.clone(),
                    from: Some(experience.value),
                    to: next,
                });
            }
        }

        if snapshot.tier.get() <= 2 && target.get() >= 3 {
            let seed = if target.get() == 3 { 3 } else { 4 };
            result
                .log
                .push(format!("Experience added: {} {:+}", NEW_EXPERIENCE_NAME, seed));
            result.experiences.push(ExperienceChange {
                name: NEW_EXPERIENCE_NAME.to_string(),
                from: None,
                to: seed,
            });
        }
    }

    fn rewrite_abilities(
        &self,
        snapshot: &CreatureSnapshot,
        archetype: Archetype,
        bench: &TierBenchmark,
        overrides: &RescaleOverrides,
        result: &mut RescaleResult,
    ) {
        let known: Vec<Change<String>> = [&result.damage.primary, &result.damage.halved]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        let damage = primary_source(archetype, bench);
        let horde_damage = if bench.halved_damage_rolls.is_empty() {
            damage
        } else {
            DamageSource::Options(&bench.halved_damage_rolls)
        };
        let ctx = FeatureContext {
            rescaler: DamageRescaler::new(snapshot.tier, result.tier.to),
            damage,
            horde_damage,
            minion_feature_range: bench.minion_feature_range.as_deref(),
            known_changes: &known,
            rng: self.random.as_ref(),
        };

        for ability in &snapshot.abilities {
            let rewrite = rewrite_ability(ability, overrides.ability(ability.id), &ctx);
            result.log.extend(rewrite.log);
            if let Some(change) = rewrite.change {
                result.abilities.push(change);
            }
        }
    }

    fn suggest_abilities(
        &self,
        snapshot: &CreatureSnapshot,
        target: Tier,
        bench: &TierBenchmark,
        overrides: &RescaleOverrides,
        result: &mut RescaleResult,
    ) {
        let resolve = |name: &String| {
            if name == RELENTLESS_PLACEHOLDER {
                format!("Relentless ({})", target)
            } else {
                name.clone()
            }
        };

        let picks: Vec<String> = match &overrides.suggested_abilities {
            Some(selected) => selected
                .iter()
                .map(resolve)
                .filter(|name| !snapshot.has_ability_named(name))
                .collect(),
            None => {
                let pool: Vec<String> = bench
                    .suggested_abilities
                    .iter()
                    .map(resolve)
                    .filter(|name| !snapshot.has_ability_named(name))
                    .collect();
                if pool.is_empty() {
                    return;
                }
                let last = i32::try_from(pool.len() - 1).unwrap_or(i32::MAX);
                let index = usize::try_from(self.random.gen_range(0, last)).unwrap_or(0);
                pool.into_iter().nth(index).into_iter().collect()
            }
        };

        for name in picks {
            if result.added_abilities.iter().any(|a| a.name == name) {
                continue;
            }
            let replaces = if SpecialAbility::classify(&name) == Some(SpecialAbility::Relentless) {
                snapshot.relentless_ability()
            } else {
                None
            };
            match replaces {
                Some(old) => {
                    result
                        .log
                        .push(format!("Ability replaced: {} -> {}", old.name, name));
                    if !result.removed_abilities.contains(&old.id) {
                        result.removed_abilities.push(old.id);
                    }
                }
                None => result.log.push(format!("Ability added: {}", name)),
            }
            result
                .added_abilities
                .push(AbilityAddition::new(name, replaces.map(|a| a.id)));
        }
    }
}

fn primary_source(archetype: Archetype, bench: &TierBenchmark) -> DamageSource<'_> {
    match (archetype, bench.basic_attack_range.as_deref()) {
        (Archetype::Minion, Some(range)) => DamageSource::FlatRange(range),
        _ => DamageSource::Options(&bench.damage_rolls),
    }
}

/// Override or roll one stat; a zero or unchanged value records nothing.
fn stat_change(
    label: &str,
    current: i32,
    manual: Option<i32>,
    roll: impl FnOnce() -> Option<i32>,
    log: &mut Vec<String>,
) -> Option<Change<i32>> {
    let Some(next) = manual.or_else(roll) else {
        tracing::warn!(stat = label, "Unreadable benchmark range");
        log.push(format!("{}: skipped (unreadable benchmark range)", label));
        return None;
    };
    if next == 0 || next == current {
        return None;
    }
    log.push(format!("{}: {} -> {}", label, current, next));
    Some(Change::new(current, next))
}
