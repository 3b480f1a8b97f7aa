//! The diff produced by rescaling a creature to another tier

use serde::{Deserialize, Serialize};

use super::Tier;
use crate::entities::Thresholds;
use crate::ids::{AbilityId, ActionId};

/// A single field moving from one value to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change<T> {
    pub from: T,
    pub to: T,
}

impl<T> Change<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

/// Core stat changes. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatChanges {
    pub difficulty: Option<Change<i32>>,
    pub hp_max: Option<Change<i32>>,
    /// Set alongside an `hp_max` change: marked HP goes back to zero
    pub reset_hp: bool,
    pub stress_max: Option<Change<i32>>,
    pub thresholds: Option<Change<Thresholds>>,
    pub attack_modifier: Option<Change<i32>>,
}

/// Creature-level attack damage changes, as formula text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageChanges {
    pub primary: Option<Change<String>>,
    pub halved: Option<Change<String>>,
}

/// An experience whose value moved, or a new one (`from == None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceChange {
    pub name: String,
    pub from: Option<i32>,
    pub to: i32,
}

/// Why an ability changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityChangeKind {
    Damage,
    NameHorde,
    NameMinion,
    NameOverride,
}

/// Changes to one nested action of an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionChange {
    pub action_id: ActionId,
    pub damage: Option<Change<String>>,
    pub description: Option<String>,
}

/// Changes to one existing ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityChange {
    pub ability_id: AbilityId,
    pub kinds: Vec<AbilityChangeKind>,
    pub name: Option<Change<String>>,
    pub description: Option<String>,
    pub actions: Vec<ActionChange>,
}

impl AbilityChange {
    pub fn new(ability_id: AbilityId) -> Self {
        Self {
            ability_id,
            kinds: Vec::new(),
            name: None,
            description: None,
            actions: Vec::new(),
        }
    }

    pub fn tag(&mut self, kind: AbilityChangeKind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.actions.is_empty()
    }
}

/// A suggested ability to add, optionally replacing an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityAddition {
    pub name: String,
    pub replaces: Option<AbilityId>,
    /// Filled from the ability catalog before the diff is applied
    #[serde(default)]
    pub description: Option<String>,
}

impl AbilityAddition {
    pub fn new(name: impl Into<String>, replaces: Option<AbilityId>) -> Self {
        Self {
            name: name.into(),
            replaces,
            description: None,
        }
    }
}

/// Everything that changes when a creature moves between tiers.
///
/// Built fresh per call; the caller persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescaleResult {
    pub tier: Change<Tier>,
    pub name: Option<Change<String>>,
    pub stats: StatChanges,
    pub damage: DamageChanges,
    pub experiences: Vec<ExperienceChange>,
    pub abilities: Vec<AbilityChange>,
    pub added_abilities: Vec<AbilityAddition>,
    pub removed_abilities: Vec<AbilityId>,
    /// Ordered human-readable change log
    pub log: Vec<String>,
}

impl RescaleResult {
    pub fn new(from: Tier, to: Tier) -> Self {
        Self {
            tier: Change::new(from, to),
            name: None,
            stats: StatChanges::default(),
            damage: DamageChanges::default(),
            experiences: Vec::new(),
            abilities: Vec::new(),
            added_abilities: Vec::new(),
            removed_abilities: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn ability(&self, id: AbilityId) -> Option<&AbilityChange> {
        self.abilities.iter().find(|a| a.ability_id == id)
    }
}
