//! Shared builders for engine tests: a small deterministic benchmark
//! catalog and a few stock adversaries.

use std::collections::BTreeMap;

use tierforge_domain::{
    AbilityAction, AbilityRecord, ActionId, ActorId, Archetype, AttackProfile, BenchmarkCatalog,
    CreatureSnapshot, ExperienceBenchmark, ThresholdRanges, Thresholds, Tier, TierBenchmark,
};

pub fn tier(n: u8) -> Tier {
    Tier::new(n).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Fixed (single-value) ranges so stat rolls are predictable.
fn row(
    difficulty: &str,
    hp: &str,
    stress: &str,
    thresholds: Option<&str>,
    attack: &str,
    damage: &[&str],
    suggested: &[&str],
) -> TierBenchmark {
    TierBenchmark {
        difficulty: difficulty.into(),
        hp: hp.into(),
        stress: stress.into(),
        thresholds: thresholds.map(|pair| ThresholdRanges {
            min: pair.into(),
            max: pair.into(),
        }),
        attack_modifier: attack.into(),
        damage_rolls: strings(damage),
        halved_damage_rolls: vec![],
        basic_attack_range: None,
        minion_feature_range: None,
        experiences: ExperienceBenchmark {
            count: "1-2".into(),
            modifier: "2".into(),
        },
        suggested_abilities: strings(suggested),
    }
}

pub fn test_catalog() -> BenchmarkCatalog {
    let standard = BTreeMap::from([
        (tier(1), row("11", "5", "3", Some("7/12"), "+1", &["1d6+1", "1d8+2"], &["Momentum"])),
        (tier(2), row("14", "6", "4", Some("10/20"), "+2", &["2d6+3", "2d8+3"], &[])),
        (
            tier(3),
            row(
                "16",
                "7",
                "4",
                Some("20/32"),
                "+3",
                &["3d6+6", "3d8+6"],
                &["Relentless (X)", "Terrifying"],
            ),
        ),
        (
            tier(4),
            row("18", "8", "5", Some("25/45"), "+3/+5", &["4d8+10"], &["Relentless (X)"]),
        ),
    ]);

    let mut horde_t2 = row("13", "5", "3", Some("8/14"), "+1", &["2d8+2"], &[]);
    horde_t2.halved_damage_rolls = strings(&["2d6+3"]);
    let mut horde_t3 = row("15", "6", "4", Some("17/28"), "+2", &["3d8+4"], &[]);
    horde_t3.halved_damage_rolls = strings(&["3d6+6"]);
    let horde = BTreeMap::from([(tier(2), horde_t2), (tier(3), horde_t3)]);

    let minion_row = |basic: &str, feature: &str| {
        let mut r = row("10", "1", "1", None, "+0", &[], &[]);
        r.basic_attack_range = Some(basic.into());
        r.minion_feature_range = Some(feature.into());
        r
    };
    let minion = BTreeMap::from([
        (tier(1), minion_row("1-3", "3/5")),
        (tier(2), minion_row("3-5", "5/7")),
        (tier(3), minion_row("5-7", "7/9")),
    ]);

    let solo = BTreeMap::from([(
        tier(1),
        row("13", "8", "4", Some("8/15"), "+3", &["1d12+3"], &[]),
    )]);

    BenchmarkCatalog::new(BTreeMap::from([
        (Archetype::Standard, standard),
        (Archetype::Horde, horde),
        (Archetype::Minion, minion),
        (Archetype::Solo, solo),
    ]))
}

fn snapshot(name: &str, archetype: &str, tier_value: u8, damage: &str) -> CreatureSnapshot {
    CreatureSnapshot {
        id: ActorId::new(),
        name: name.into(),
        tier: tier(tier_value),
        archetype: archetype.into(),
        difficulty: 11,
        hp_max: 5,
        hp_value: 2,
        stress_max: 3,
        thresholds: Thresholds {
            major: 7,
            severe: 12,
        },
        attack: AttackProfile {
            modifier: 1,
            damage: damage.into(),
            halved_damage: None,
        },
        abilities: vec![],
        experiences: vec![],
    }
}

/// Tier 1 standard with a bite that deals `1d8+2`.
pub fn goblin() -> CreatureSnapshot {
    let mut goblin = snapshot("Goblin", "standard", 1, "1d8+2");
    goblin.abilities.push(
        AbilityRecord::new("Bite", "<p>Deals 1d8+2 physical damage.</p>").with_action(
            AbilityAction {
                id: ActionId::new(),
                name: "Bite".into(),
                damage: Some("1d8+2".into()),
                description: "Roll 1d8+2.".into(),
            },
        ),
    );
    goblin
}

/// Tier 2 horde whose halved damage is embedded in `Horde (2d6+3)`.
pub fn horde_rats() -> CreatureSnapshot {
    let mut rats = snapshot("Rat Swarm", "horde", 2, "2d8+2");
    rats.attack.halved_damage = Some("2d6+3".into());
    rats.abilities.push(AbilityRecord::new(
        "Horde (2d6+3)",
        "<p>When the swarm has marked half or more of its HP, its standard attack deals 2d6+3 physical damage instead.</p>",
    ));
    rats
}

/// Tier 1 minions with flat damage and `Minion (3)`.
pub fn minion_zombies() -> CreatureSnapshot {
    let mut zombies = snapshot("Rotted Zombie", "minion", 1, "2");
    zombies.thresholds = Thresholds::default();
    zombies.abilities.push(AbilityRecord::new(
        "Minion (3)",
        "<p>Defeated when they take any damage. For every <strong>3</strong> damage a PC deals, defeat an additional Minion.</p>",
    ));
    zombies
}
