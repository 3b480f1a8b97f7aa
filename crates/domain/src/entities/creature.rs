//! Stored adversaries as the rescaling engine sees them

use serde::{Deserialize, Serialize};

use crate::ids::{AbilityId, ActionId, ActorId};
use crate::value_objects::{RescaleResult, SpecialAbility, Tier};

/// Major/severe damage thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub major: i32,
    pub severe: i32,
}

/// Standard attack of an adversary. Damage is kept as stored text and
/// parsed on use, so a malformed value only affects its own field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackProfile {
    pub modifier: i32,
    pub damage: String,
    /// Horde damage once half the HP is marked
    #[serde(default)]
    pub halved_damage: Option<String>,
}

/// A nested action (attack, reaction...) of an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityAction {
    pub id: ActionId,
    pub name: String,
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// A feature of an adversary.
///
/// Two name conventions carry state: `Horde (<formula>)` and
/// `Minion (<N>)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRecord {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actions: Vec<AbilityAction>,
}

impl AbilityRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: AbilityId::new(),
            name: name.into(),
            description: description.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: AbilityAction) -> Self {
        self.actions.push(action);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub name: String,
    pub value: i32,
}

/// Immutable view of one creature handed to the rescaling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureSnapshot {
    pub id: ActorId,
    pub name: String,
    pub tier: Tier,
    /// Raw archetype tag as stored; may be unknown to the benchmark table
    pub archetype: String,
    pub difficulty: i32,
    pub hp_max: i32,
    /// Marked HP
    #[serde(default)]
    pub hp_value: i32,
    pub stress_max: i32,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub attack: AttackProfile,
    #[serde(default)]
    pub abilities: Vec<AbilityRecord>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

impl CreatureSnapshot {
    pub fn has_ability_named(&self, name: &str) -> bool {
        self.abilities.iter().any(|a| a.name == name)
    }

    /// The first `Relentless (...)` ability, if any.
    pub fn relentless_ability(&self) -> Option<&AbilityRecord> {
        self.abilities
            .iter()
            .find(|a| SpecialAbility::classify(&a.name) == Some(SpecialAbility::Relentless))
    }

    /// Special-ability classes present on this creature.
    pub fn special_abilities(&self) -> impl Iterator<Item = SpecialAbility> + '_ {
        self.abilities
            .iter()
            .filter_map(|a| SpecialAbility::classify(&a.name))
    }

    /// Write a rescale diff into this snapshot.
    pub fn apply_rescale(&mut self, diff: &RescaleResult) {
        self.tier = diff.tier.to;
        if let Some(name) = &diff.name {
            self.name = name.to.clone();
        }

        let stats = &diff.stats;
        if let Some(c) = &stats.difficulty {
            self.difficulty = c.to;
        }
        if let Some(c) = &stats.hp_max {
            self.hp_max = c.to;
        }
        if stats.reset_hp {
            self.hp_value = 0;
        }
        if let Some(c) = &stats.stress_max {
            self.stress_max = c.to;
        }
        if let Some(c) = &stats.thresholds {
            self.thresholds = c.to;
        }
        if let Some(c) = &stats.attack_modifier {
            self.attack.modifier = c.to;
        }

        if let Some(c) = &diff.damage.primary {
            self.attack.damage = c.to.clone();
        }
        if let Some(c) = &diff.damage.halved {
            self.attack.halved_damage = Some(c.to.clone());
        }

        for change in &diff.experiences {
            match self.experiences.iter_mut().find(|e| e.name == change.name) {
                Some(existing) => existing.value = change.to,
                None => self.experiences.push(Experience {
                    name: change.name.clone(),
                    value: change.to,
                }),
            }
        }

        for change in &diff.abilities {
            let Some(ability) = self.abilities.iter_mut().find(|a| a.id == change.ability_id) else {
                continue;
            };
            if let Some(name) = &change.name {
                ability.name = name.to.clone();
            }
            if let Some(description) = &change.description {
                ability.description = description.clone();
            }
            for action_change in &change.actions {
                let Some(action) = ability
                    .actions
                    .iter_mut()
                    .find(|a| a.id == action_change.action_id)
                else {
                    continue;
                };
                if let Some(damage) = &action_change.damage {
                    action.damage = Some(damage.to.clone());
                }
                if let Some(description) = &action_change.description {
                    action.description = description.clone();
                }
            }
        }

        self.abilities
            .retain(|a| !diff.removed_abilities.contains(&a.id));
        for addition in &diff.added_abilities {
            self.abilities.push(AbilityRecord::new(
                addition.name.clone(),
                addition.description.clone().unwrap_or_default(),
            ));
        }
    }
}
