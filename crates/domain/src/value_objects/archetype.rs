//! Adversary archetypes (creature role tags)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Fixed creature role tag selecting which benchmark row applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Bruiser,
    Horde,
    Leader,
    Minion,
    Ranged,
    Skulk,
    Solo,
    Social,
    Standard,
    Support,
}

impl Archetype {
    pub const ALL: [Archetype; 10] = [
        Self::Bruiser,
        Self::Horde,
        Self::Leader,
        Self::Minion,
        Self::Ranged,
        Self::Skulk,
        Self::Solo,
        Self::Social,
        Self::Standard,
        Self::Support,
    ];

    /// The lowercase tag used in stored creatures and benchmark files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bruiser => "bruiser",
            Self::Horde => "horde",
            Self::Leader => "leader",
            Self::Minion => "minion",
            Self::Ranged => "ranged",
            Self::Skulk => "skulk",
            Self::Solo => "solo",
            Self::Social => "social",
            Self::Standard => "standard",
            Self::Support => "support",
        }
    }

    /// Battle point cost of a single unit of this archetype.
    ///
    /// Minions are costed collectively per party size and return `None`.
    pub fn battle_points(&self) -> Option<u32> {
        match self {
            Self::Social | Self::Support => Some(1),
            Self::Horde | Self::Ranged | Self::Skulk | Self::Standard => Some(2),
            Self::Leader => Some(3),
            Self::Bruiser => Some(4),
            Self::Solo => Some(5),
            Self::Minion => None,
        }
    }

    /// Archetypes that hit hard enough to anchor an encounter.
    pub fn is_heavy_hitter(&self) -> bool {
        matches!(
            self,
            Self::Bruiser | Self::Horde | Self::Leader | Self::Solo
        )
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Archetype {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.tag() == tag)
            .ok_or_else(|| DomainError::parse(format!("Unknown archetype: {}", s)))
    }
}
