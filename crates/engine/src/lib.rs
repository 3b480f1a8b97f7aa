//! Tierforge engine library.
//!
//! Rescales adversaries between tiers against a benchmark table and scores
//! encounters against a party's battle point budget.
//!
//! ## Structure
//!
//! - `rules/` - Pure rescale and budget engines
//! - `use_cases/` - Orchestration over the actor repository
//! - `infrastructure/` - Ports, adapters, benchmark loading and settings

pub mod infrastructure;
pub mod rules;
pub mod use_cases;

/// Shared fixtures for unit tests.
#[cfg(test)]
pub mod test_fixtures;
