//! Score a group of stored actors against a party's budget.

use std::sync::Arc;

use tierforge_domain::{ActorId, BudgetState, CreatureSnapshot, EncounterUnit};

use crate::infrastructure::ports::{ActorRepo, RepoError};
use crate::rules::{compute_budget, PartySettings};

/// One stored actor placed in the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterMember {
    pub actor_id: ActorId,
    /// Copies of this actor (minion groups)
    pub count: u32,
    pub damage_boost: bool,
}

impl EncounterMember {
    pub fn new(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            count: 1,
            damage_boost: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanEncounterError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Budget unit for a stored creature; special abilities come from its
/// ability names.
pub fn unit_from_snapshot(snapshot: &CreatureSnapshot) -> EncounterUnit {
    snapshot.special_abilities().fold(
        EncounterUnit::new(snapshot.archetype.to_lowercase(), snapshot.tier.get()),
        EncounterUnit::with_ability,
    )
}

pub struct PlanEncounter {
    actors: Arc<dyn ActorRepo>,
}

impl PlanEncounter {
    pub fn new(actors: Arc<dyn ActorRepo>) -> Self {
        Self { actors }
    }

    pub async fn execute(
        &self,
        members: &[EncounterMember],
        party: &PartySettings,
    ) -> Result<BudgetState, PlanEncounterError> {
        let mut units = Vec::new();
        for member in members {
            let snapshot = self.actors.get_snapshot(member.actor_id).await?;
            let mut unit = unit_from_snapshot(&snapshot);
            if member.damage_boost {
                unit = unit.with_damage_boost();
            }
            units.extend(std::iter::repeat_n(unit, member.count as usize));
        }

        let state = compute_budget(&units, party);
        tracing::info!(
            units = units.len(),
            cost = state.cost,
            limit = state.limit,
            difficulty = %state.difficulty,
            "Encounter planned"
        );
        Ok(state)
    }
}
