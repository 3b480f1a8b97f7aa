//! Use cases over stored actors.

pub mod plan_encounter;
pub mod rescale_actor;

pub use plan_encounter::{unit_from_snapshot, EncounterMember, PlanEncounter, PlanEncounterError};
pub use rescale_actor::{RescaleActor, RescaleActorError, RescalePreview};
