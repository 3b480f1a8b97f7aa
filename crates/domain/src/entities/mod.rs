//! Domain entities - Core business objects with identity

mod creature;

pub use creature::{
    AbilityAction, AbilityRecord, AttackProfile, CreatureSnapshot, Experience, Thresholds,
};
