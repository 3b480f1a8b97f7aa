//! Infrastructure implementations.
//!
//! Port traits plus the adapters the runner wires together.

pub mod ability_catalog;
pub mod benchmarks;
pub mod json_actor_repo;
pub mod ports;
pub mod random;
pub mod settings;
