//! Port traits the engine consumes.
//!
//! The rules engines never touch storage or ambient randomness directly;
//! everything comes in through these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tierforge_domain::{ActorId, CreatureSnapshot, RescaleResult};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: &'static str, id: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Repository Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorRepo: Send + Sync {
    async fn get_snapshot(&self, id: ActorId) -> Result<CreatureSnapshot, RepoError>;
    async fn apply_diff(&self, id: ActorId, diff: &RescaleResult) -> Result<(), RepoError>;
}

/// Catalog entry used to enrich suggested abilities for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAbility {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub kind: String,
    pub description: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait AbilityCatalog: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<CatalogAbility>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in `min..=max`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
