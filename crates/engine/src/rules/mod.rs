//! Rules engines: tier rescaling and encounter budgeting.
//!
//! Everything here is synchronous and storage-free. Randomness arrives
//! through [`RandomPort`](crate::infrastructure::ports::RandomPort).

pub mod actor_rescale;
pub mod damage_rescaler;
pub mod encounter_budget;
pub mod feature_text;
pub mod range_roller;

pub use actor_rescale::{retag_name, ActorRescaler, RescaleError, RescaleOptions};
pub use damage_rescaler::{DamageRescaler, DamageSource};
pub use encounter_budget::{compute_budget, PartySettings};
