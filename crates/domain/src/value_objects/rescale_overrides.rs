//! Manual values that bypass randomized rescaling

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::DamageFormula;
use crate::ids::AbilityId;

/// Per-ability manual values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityOverride {
    /// Replacement display name
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement damage for the ability's nested actions, or the embedded
    /// formula of a `Horde (...)` ability
    #[serde(default)]
    pub damage: Option<DamageFormula>,
}

/// Caller-supplied manual values for one rescale call.
///
/// Every field is optional; a present field replaces the corresponding
/// rolled value. The engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescaleOverrides {
    #[serde(default)]
    pub difficulty: Option<i32>,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub stress: Option<i32>,
    #[serde(default)]
    pub major_threshold: Option<i32>,
    #[serde(default)]
    pub severe_threshold: Option<i32>,
    #[serde(default)]
    pub attack_modifier: Option<i32>,
    #[serde(default)]
    pub damage: Option<DamageFormula>,
    #[serde(default)]
    pub halved_damage: Option<DamageFormula>,
    #[serde(default)]
    pub abilities: BTreeMap<AbilityId, AbilityOverride>,
    /// Explicit suggested-ability picks; `None` lets the engine choose one
    #[serde(default)]
    pub suggested_abilities: Option<Vec<String>>,
}

impl RescaleOverrides {
    pub fn ability(&self, id: AbilityId) -> Option<&AbilityOverride> {
        self.abilities.get(&id)
    }
}
