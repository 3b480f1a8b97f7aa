//! Battle point budget and difficulty for a group of adversaries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tierforge_domain::{
    Archetype, BudgetModifier, BudgetState, EncounterDifficulty, EncounterUnit, FearBand,
    ManualToggles, SpecialAbility, Tier,
};

/// The party an encounter is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySettings {
    pub count: u32,
    pub tier: u8,
    #[serde(default)]
    pub fear_band: FearBand,
    #[serde(default)]
    pub toggles: ManualToggles,
}

impl PartySettings {
    pub fn new(count: u32, tier: u8) -> Self {
        Self {
            count,
            tier,
            fear_band: FearBand::default(),
            toggles: ManualToggles::default(),
        }
    }
}

/// Base level from how far the cost sits above or below the limit.
fn base_level(diff: i32) -> i32 {
    match diff {
        i32::MIN..=-5 => 0,
        -4..=-2 => 1,
        -1..=1 => 2,
        2..=3 => 3,
        4..=5 => 4,
        _ => 5,
    }
}

/// Compute cost, limit, modifiers and difficulty. Never fails: units with
/// an unknown archetype or an invalid tier cost nothing and are ignored.
pub fn compute_budget(units: &[EncounterUnit], party: &PartySettings) -> BudgetState {
    let valid: Vec<(Archetype, Tier, &EncounterUnit)> = units
        .iter()
        .filter_map(|unit| {
            let archetype = unit.archetype.parse::<Archetype>().ok()?;
            let tier = Tier::new(unit.tier).ok()?;
            Some((archetype, tier, unit))
        })
        .collect();
    if valid.len() < units.len() {
        tracing::debug!(
            ignored = units.len() - valid.len(),
            "Ignoring encounter units with unknown archetype or tier"
        );
    }

    let party_count = i32::try_from(party.count).unwrap_or(i32::MAX);
    let base_budget = party_count.saturating_mul(3).saturating_add(2);

    let minions = valid
        .iter()
        .filter(|(archetype, _, _)| *archetype == Archetype::Minion)
        .count();
    let minion_cost = minions.div_ceil(party.count.max(1) as usize);
    let unit_cost: u32 = valid
        .iter()
        .filter_map(|(archetype, _, _)| archetype.battle_points())
        .sum();
    let cost = i32::try_from(minion_cost)
        .unwrap_or(i32::MAX)
        .saturating_add(i32::try_from(unit_cost).unwrap_or(i32::MAX));

    let mut modifiers = Vec::new();
    if party.toggles.easier {
        modifiers.push(BudgetModifier::ManualEasier);
    }
    if party.toggles.harder {
        modifiers.push(BudgetModifier::ManualHarder);
    }
    let solos = valid
        .iter()
        .filter(|(archetype, _, _)| *archetype == Archetype::Solo)
        .count();
    if solos >= 2 {
        modifiers.push(BudgetModifier::MultipleSolos);
    }
    if valid.iter().any(|(_, _, unit)| unit.damage_boost) {
        modifiers.push(BudgetModifier::DamageBoost);
    }
    if valid.iter().any(|(_, tier, _)| tier.get() < party.tier) {
        modifiers.push(BudgetModifier::LowerTierUnits);
    }
    let heavy = valid
        .iter()
        .any(|(archetype, _, _)| archetype.is_heavy_hitter());
    if !valid.is_empty() && !heavy {
        modifiers.push(BudgetModifier::NoHeavyHitters);
    }
    let limit = base_budget + modifiers.iter().map(BudgetModifier::value).sum::<i32>();

    let abilities: BTreeSet<SpecialAbility> = valid
        .iter()
        .flat_map(|(_, _, unit)| unit.special_abilities.iter().copied())
        .collect();
    let mut shift = party.fear_band.level_shift();
    if abilities.contains(&SpecialAbility::Summoner)
        && abilities.contains(&SpecialAbility::Spotlighter)
    {
        shift += 1;
    }
    if abilities.contains(&SpecialAbility::Relentless)
        && (abilities.contains(&SpecialAbility::Momentum)
            || abilities.contains(&SpecialAbility::Terrifying))
    {
        shift += 1;
    }

    let level = (base_level(cost - limit) + shift).clamp(0, EncounterDifficulty::MAX_LEVEL);
    let difficulty = if valid.iter().any(|(_, tier, _)| tier.get() > party.tier) {
        EncounterDifficulty::OutOfTier
    } else {
        EncounterDifficulty::from_level(level)
    };

    tracing::debug!(cost, limit, level, difficulty = %difficulty, "Computed encounter budget");

    BudgetState {
        party_count: party.count,
        party_tier: party.tier,
        fear_band: party.fear_band,
        toggles: party.toggles,
        base_budget,
        limit,
        cost,
        modifiers,
        level,
        difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(archetype: &str, tier: u8) -> EncounterUnit {
        EncounterUnit::new(archetype, tier)
    }

    #[test]
    fn single_bruiser_against_four_is_very_easy() {
        let state = compute_budget(&[unit("bruiser", 1)], &PartySettings::new(4, 1));
        assert_eq!(state.base_budget, 14);
        assert_eq!(state.limit, 14);
        assert_eq!(state.cost, 4);
        assert!(state.modifiers.is_empty());
        assert_eq!(state.difficulty, EncounterDifficulty::VeryEasy);
    }

    #[test]
    fn costs_per_archetype() {
        let units = [
            unit("social", 1),
            unit("support", 1),
            unit("horde", 1),
            unit("ranged", 1),
            unit("skulk", 1),
            unit("standard", 1),
            unit("leader", 1),
            unit("bruiser", 1),
            unit("solo", 1),
        ];
        let state = compute_budget(&units, &PartySettings::new(4, 1));
        assert_eq!(state.cost, 1 + 1 + 2 + 2 + 2 + 2 + 3 + 4 + 5);
    }

    #[test]
    fn minions_cost_per_party_member_rounded_up() {
        let minions: Vec<EncounterUnit> = (0..5).map(|_| unit("minion", 1)).collect();
        let state = compute_budget(&minions, &PartySettings::new(4, 1));
        assert_eq!(state.cost, 2);
        let state = compute_budget(&minions, &PartySettings::new(0, 1));
        assert_eq!(state.cost, 5);
    }

    #[test]
    fn malformed_units_are_ignored() {
        let units = [unit("dragon", 1), unit("bruiser", 9), unit("bruiser", 1)];
        let state = compute_budget(&units, &PartySettings::new(4, 1));
        assert_eq!(state.cost, 4);
        assert_eq!(state.difficulty, EncounterDifficulty::VeryEasy);
    }

    #[test]
    fn empty_encounter_gets_no_heavy_hitter_modifier() {
        let state = compute_budget(&[], &PartySettings::new(4, 1));
        assert!(state.modifiers.is_empty());
        assert_eq!(state.cost, 0);
    }

    #[test]
    fn modifiers_adjust_limit() {
        let mut party = PartySettings::new(4, 2);
        party.toggles = ManualToggles {
            easier: true,
            harder: true,
        };
        let units = [
            unit("solo", 2),
            unit("solo", 2).with_damage_boost(),
            unit("standard", 1),
        ];
        let state = compute_budget(&units, &party);
        assert_eq!(
            state.modifiers,
            vec![
                BudgetModifier::ManualEasier,
                BudgetModifier::ManualHarder,
                BudgetModifier::MultipleSolos,
                BudgetModifier::DamageBoost,
                BudgetModifier::LowerTierUnits,
            ]
        );
        assert_eq!(state.limit, 14 - 1 + 2 - 2 - 2 + 1);
    }

    #[test]
    fn no_heavy_hitters_raises_limit() {
        let units = [unit("skulk", 1), unit("ranged", 1)];
        let state = compute_budget(&units, &PartySettings::new(3, 1));
        assert_eq!(state.modifiers, vec![BudgetModifier::NoHeavyHitters]);
        assert_eq!(state.limit, 12);
    }

    #[test]
    fn difficulty_bands() {
        let party = PartySettings::new(1, 1);
        let bruisers =
            |n: usize| -> Vec<EncounterUnit> { (0..n).map(|_| unit("bruiser", 1)).collect() };
        let difficulty = |n: usize| compute_budget(&bruisers(n), &party).difficulty;
        // limit 5
        assert_eq!(difficulty(1), EncounterDifficulty::Balanced);
        assert_eq!(difficulty(2), EncounterDifficulty::Challenging);
        assert_eq!(difficulty(3), EncounterDifficulty::Deadly);
        let standards = [unit("standard", 1), unit("bruiser", 1)];
        let state = compute_budget(&standards, &party);
        assert_eq!(state.cost - state.limit, 1);
        assert_eq!(state.difficulty, EncounterDifficulty::Balanced);
    }

    #[test]
    fn fear_band_shifts_level() {
        let units = [unit("bruiser", 1)];
        let mut party = PartySettings::new(1, 1);
        party.fear_band = FearBand::ZeroToOne;
        assert_eq!(compute_budget(&units, &party).difficulty, EncounterDifficulty::Easy);
        party.fear_band = FearBand::FourToEight;
        assert_eq!(compute_budget(&units, &party).difficulty, EncounterDifficulty::Hard);
        party.fear_band = FearBand::SixToTwelve;
        assert_eq!(compute_budget(&units, &party).level, 4);
    }

    #[test]
    fn synergies_shift_level_and_clamp() {
        let units = [
            unit("leader", 1).with_ability(SpecialAbility::Summoner),
            unit("support", 1).with_ability(SpecialAbility::Spotlighter),
            unit("bruiser", 1)
                .with_ability(SpecialAbility::Relentless)
                .with_ability(SpecialAbility::Terrifying),
        ];
        let mut party = PartySettings::new(4, 1);
        let state = compute_budget(&units, &party);
        // cost 8, limit 14, diff -6 -> 0, +2 synergy
        assert_eq!(state.level, 2);
        party.fear_band = FearBand::SixToTwelve;
        let crowded: Vec<EncounterUnit> = units
            .iter()
            .cloned()
            .chain((0..4).map(|_| unit("solo", 1)))
            .collect();
        assert_eq!(compute_budget(&crowded, &party).level, 5);
    }

    #[test]
    fn relentless_alone_is_no_synergy() {
        let units = [unit("bruiser", 1).with_ability(SpecialAbility::Relentless)];
        let state = compute_budget(&units, &PartySettings::new(4, 1));
        assert_eq!(state.level, 0);
    }

    #[test]
    fn higher_tier_unit_is_out_of_tier() {
        let units = [unit("bruiser", 1), unit("standard", 3)];
        let state = compute_budget(&units, &PartySettings::new(4, 2));
        assert_eq!(state.difficulty, EncounterDifficulty::OutOfTier);
        assert_eq!(state.difficulty.label(), "Out of Tier");
    }
}
