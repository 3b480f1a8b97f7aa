//! Value objects - Immutable objects defined by their attributes

mod archetype;
mod benchmark;
mod damage_formula;
mod encounter;
mod rescale_overrides;
mod rescale_result;
mod tier;

pub use archetype::Archetype;
pub use benchmark::{BenchmarkCatalog, ExperienceBenchmark, ThresholdRanges, TierBenchmark};
pub use damage_formula::{DamageFormula, FormulaParseError};
pub use encounter::{
    BudgetModifier, BudgetState, EncounterDifficulty, EncounterUnit, FearBand, ManualToggles,
    SpecialAbility,
};
pub use rescale_overrides::{AbilityOverride, RescaleOverrides};
pub use rescale_result::{
    AbilityAddition, AbilityChange, AbilityChangeKind, ActionChange, Change, DamageChanges,
    ExperienceChange, RescaleResult, StatChanges,
};
pub use tier::Tier;
