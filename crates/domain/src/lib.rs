//! Tierforge domain: creature snapshots, benchmark tables, damage formulas,
//! rescale diffs and encounter budget vocabulary.
//!
//! Pure data. Randomness, text rewriting and I/O live in `tierforge-engine`.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    AbilityAction, AbilityRecord, AttackProfile, CreatureSnapshot, Experience, Thresholds,
};

pub use error::DomainError;

pub use ids::{AbilityId, ActionId, ActorId};

pub use value_objects::{
    AbilityAddition, AbilityChange, AbilityChangeKind, AbilityOverride, ActionChange, Archetype,
    BenchmarkCatalog, BudgetModifier, BudgetState, Change, DamageChanges, DamageFormula,
    EncounterDifficulty, EncounterUnit, ExperienceBenchmark, ExperienceChange, FearBand,
    FormulaParseError, ManualToggles, RescaleOverrides, RescaleResult, SpecialAbility,
    StatChanges, ThresholdRanges, Tier, TierBenchmark,
};
