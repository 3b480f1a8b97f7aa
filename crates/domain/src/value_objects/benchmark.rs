//! Adversary benchmark tables
//!
//! Per-archetype, per-tier stat ranges and damage option sets. Range fields
//! are kept as the text the tables are written in ("12-14", "+1/+3",
//! "7/12"); rolling them is an engine concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Archetype, DamageFormula, Tier};
use crate::error::DomainError;

/// Major/severe damage threshold ranges.
///
/// Both fields are `"<major>/<severe>"` pairs: `min` holds the lower bounds
/// and `max` the upper bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRanges {
    pub min: String,
    pub max: String,
}

/// How many experiences an adversary has and how strong they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBenchmark {
    pub count: String,
    pub modifier: String,
}

/// One archetype at one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBenchmark {
    pub difficulty: String,
    pub hp: String,
    pub stress: String,
    #[serde(default)]
    pub thresholds: Option<ThresholdRanges>,
    pub attack_modifier: String,
    #[serde(default)]
    pub damage_rolls: Vec<String>,
    /// Damage once a horde has marked half its HP (horde only)
    #[serde(default)]
    pub halved_damage_rolls: Vec<String>,
    /// Flat basic attack damage range (minion only)
    #[serde(default)]
    pub basic_attack_range: Option<String>,
    /// Damage per extra minion defeated (minion only)
    #[serde(default)]
    pub minion_feature_range: Option<String>,
    pub experiences: ExperienceBenchmark,
    #[serde(default)]
    pub suggested_abilities: Vec<String>,
}

impl TierBenchmark {
    /// Every damage option string this row carries.
    fn damage_options(&self) -> impl Iterator<Item = &String> {
        self.damage_rolls.iter().chain(self.halved_damage_rolls.iter())
    }
}

/// Read-only benchmark table keyed by archetype then tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkCatalog {
    archetypes: BTreeMap<Archetype, BTreeMap<Tier, TierBenchmark>>,
}

impl BenchmarkCatalog {
    pub fn new(archetypes: BTreeMap<Archetype, BTreeMap<Tier, TierBenchmark>>) -> Self {
        Self { archetypes }
    }

    pub fn has_archetype(&self, archetype: Archetype) -> bool {
        self.archetypes.contains_key(&archetype)
    }

    pub fn tiers(&self, archetype: Archetype) -> Option<&BTreeMap<Tier, TierBenchmark>> {
        self.archetypes.get(&archetype)
    }

    pub fn get(&self, archetype: Archetype, tier: Tier) -> Option<&TierBenchmark> {
        self.archetypes.get(&archetype)?.get(&tier)
    }

    /// (archetype, tier) pairs with no row.
    pub fn missing_entries(&self) -> Vec<(Archetype, Tier)> {
        Archetype::ALL
            .into_iter()
            .flat_map(|a| Tier::all().map(move |t| (a, t)))
            .filter(|(a, t)| self.get(*a, *t).is_none())
            .collect()
    }

    /// Checks that every damage option in the table is a parseable formula.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (archetype, tiers) in &self.archetypes {
            for (tier, row) in tiers {
                for option in row.damage_options() {
                    DamageFormula::parse(option).map_err(|e| {
                        DomainError::validation(format!(
                            "{} tier {} damage option '{}': {}",
                            archetype, tier, option, e
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(damage_rolls: &[&str]) -> TierBenchmark {
        TierBenchmark {
            difficulty: "12-14".into(),
            hp: "5-7".into(),
            stress: "3".into(),
            thresholds: Some(ThresholdRanges {
                min: "7/12".into(),
                max: "9/16".into(),
            }),
            attack_modifier: "+0/+2".into(),
            damage_rolls: damage_rolls.iter().map(|s| s.to_string()).collect(),
            halved_damage_rolls: vec![],
            basic_attack_range: None,
            minion_feature_range: None,
            experiences: ExperienceBenchmark {
                count: "1-2".into(),
                modifier: "2".into(),
            },
            suggested_abilities: vec![],
        }
    }

    fn catalog_with(row: TierBenchmark) -> BenchmarkCatalog {
        let tier = Tier::new(1).unwrap();
        BenchmarkCatalog::new(BTreeMap::from([(
            Archetype::Bruiser,
            BTreeMap::from([(tier, row)]),
        )]))
    }

    #[test]
    fn looks_up_by_archetype_and_tier() {
        let catalog = catalog_with(row(&["1d8+2"]));
        assert!(catalog.get(Archetype::Bruiser, Tier::new(1).unwrap()).is_some());
        assert!(catalog.get(Archetype::Bruiser, Tier::new(2).unwrap()).is_none());
        assert!(!catalog.has_archetype(Archetype::Solo));
        assert_eq!(catalog.missing_entries().len(), 39);
    }

    #[test]
    fn validate_rejects_bad_damage_option() {
        assert!(catalog_with(row(&["1d8+2", "2d10"])).validate().is_ok());
        let err = catalog_with(row(&["lots"])).validate().unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn deserializes_tier_keys_from_strings() {
        let json = r#"{
            "minion": {
                "2": {
                    "difficulty": "14",
                    "hp": "1",
                    "stress": "1",
                    "attackModifier": "+1/+2",
                    "basicAttackRange": "3-5",
                    "minionFeatureRange": "7/9",
                    "experiences": { "count": "0-1", "modifier": "2" }
                }
            }
        }"#;
        let catalog: BenchmarkCatalog = serde_json::from_str(json).unwrap();
        let row = catalog
            .get(Archetype::Minion, Tier::new(2).unwrap())
            .unwrap();
        assert_eq!(row.basic_attack_range.as_deref(), Some("3-5"));
        assert!(row.thresholds.is_none());
        assert!(row.damage_rolls.is_empty());
    }
}
