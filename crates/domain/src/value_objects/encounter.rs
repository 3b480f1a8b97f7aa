//! Encounter budget vocabulary: units, party settings and difficulty labels

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// High-impact abilities that matter for encounter synergy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialAbility {
    Summoner,
    Spotlighter,
    Relentless,
    Momentum,
    Terrifying,
}

impl SpecialAbility {
    /// Classify an ability by its display name.
    pub fn classify(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if name.starts_with("relentless") {
            Some(Self::Relentless)
        } else if name.starts_with("momentum") {
            Some(Self::Momentum)
        } else if name.starts_with("terrifying") {
            Some(Self::Terrifying)
        } else if name.contains("summon") || name.contains("reinforcements") {
            Some(Self::Summoner)
        } else if name.contains("spotlight") {
            Some(Self::Spotlighter)
        } else {
            None
        }
    }
}

/// One creature as seen by the budget calculator.
///
/// `archetype` is the raw stored tag; units with an unknown tag cost
/// nothing and are otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterUnit {
    pub archetype: String,
    pub tier: u8,
    #[serde(default)]
    pub special_abilities: BTreeSet<SpecialAbility>,
    #[serde(default)]
    pub damage_boost: bool,
}

impl EncounterUnit {
    pub fn new(archetype: impl Into<String>, tier: u8) -> Self {
        Self {
            archetype: archetype.into(),
            tier,
            special_abilities: BTreeSet::new(),
            damage_boost: false,
        }
    }

    pub fn with_ability(mut self, ability: SpecialAbility) -> Self {
        self.special_abilities.insert(ability);
        self
    }

    pub fn with_damage_boost(mut self) -> Self {
        self.damage_boost = true;
        self
    }
}

/// GM-selected fear budget band for the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FearBand {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[default]
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "2-4")]
    TwoToFour,
    #[serde(rename = "4-8")]
    FourToEight,
    #[serde(rename = "6-12")]
    SixToTwelve,
}

impl FearBand {
    pub const ALL: [FearBand; 5] = [
        Self::ZeroToOne,
        Self::OneToThree,
        Self::TwoToFour,
        Self::FourToEight,
        Self::SixToTwelve,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ZeroToOne => "0-1",
            Self::OneToThree => "1-3",
            Self::TwoToFour => "2-4",
            Self::FourToEight => "4-8",
            Self::SixToTwelve => "6-12",
        }
    }

    /// How far this band moves the difficulty level.
    pub fn level_shift(&self) -> i32 {
        match self {
            Self::ZeroToOne => -1,
            Self::OneToThree => 0,
            Self::TwoToFour => 1,
            Self::FourToEight | Self::SixToTwelve => 2,
        }
    }
}

impl FromStr for FearBand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown fear band: {}", s)))
    }
}

/// GM toggles that nudge the budget limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualToggles {
    pub easier: bool,
    pub harder: bool,
}

/// An adjustment applied to the battle point limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetModifier {
    /// GM asked for an easier fight
    ManualEasier,
    /// GM asked for a harder fight
    ManualHarder,
    /// Two or more solos
    MultipleSolos,
    /// Some adversary deals boosted damage
    DamageBoost,
    /// Some adversary is below the party's tier
    LowerTierUnits,
    /// No bruiser, horde, leader or solo in the fight
    NoHeavyHitters,
}

impl BudgetModifier {
    pub fn value(&self) -> i32 {
        match self {
            Self::ManualEasier => -1,
            Self::ManualHarder => 2,
            Self::MultipleSolos => -2,
            Self::DamageBoost => -2,
            Self::LowerTierUnits => 1,
            Self::NoHeavyHitters => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ManualEasier => "Easier fight",
            Self::ManualHarder => "Harder fight",
            Self::MultipleSolos => "Two or more solos",
            Self::DamageBoost => "Increased damage",
            Self::LowerTierUnits => "Lower-tier adversaries",
            Self::NoHeavyHitters => "No bruisers, hordes, leaders or solos",
        }
    }
}

/// Resulting difficulty classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterDifficulty {
    VeryEasy,
    Easy,
    Balanced,
    Challenging,
    Hard,
    Deadly,
    OutOfTier,
}

impl EncounterDifficulty {
    pub const MAX_LEVEL: i32 = 5;

    /// Map a clamped level (0..=5) to its label.
    pub fn from_level(level: i32) -> Self {
        match level.clamp(0, Self::MAX_LEVEL) {
            0 => Self::VeryEasy,
            1 => Self::Easy,
            2 => Self::Balanced,
            3 => Self::Challenging,
            4 => Self::Hard,
            _ => Self::Deadly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::Balanced => "Balanced",
            Self::Challenging => "Challenging",
            Self::Hard => "Hard",
            Self::Deadly => "Deadly",
            Self::OutOfTier => "Out of Tier",
        }
    }
}

impl fmt::Display for EncounterDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full outcome of an encounter budget computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    pub party_count: u32,
    pub party_tier: u8,
    pub fear_band: FearBand,
    pub toggles: ManualToggles,
    pub base_budget: i32,
    pub limit: i32,
    pub cost: i32,
    pub modifiers: Vec<BudgetModifier>,
    /// Level after fear and synergy shifts, clamped to 0..=5
    pub level: i32,
    pub difficulty: EncounterDifficulty,
}
