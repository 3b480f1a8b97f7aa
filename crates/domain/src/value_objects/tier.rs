//! Power tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Integer power band, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "tier must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Signed number of tiers from `self` to `other`.
    pub fn steps_to(&self, other: Tier) -> i32 {
        i32::from(other.0) - i32::from(self.0)
    }

    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::MIN..=Self::MAX).map(Tier)
    }
}

impl TryFrom<u8> for Tier {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('T')
            .or_else(|| trimmed.strip_prefix('t'))
            .unwrap_or(trimmed);
        let value: u8 = digits
            .parse()
            .map_err(|_| DomainError::parse(format!("Invalid tier: {}", s)))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(Tier::new(0).is_err());
        assert!(Tier::new(5).is_err());
        assert_eq!(Tier::new(3).unwrap().get(), 3);
    }

    #[test]
    fn parses_with_optional_prefix() {
        assert_eq!("T2".parse::<Tier>().unwrap(), Tier::new(2).unwrap());
        assert_eq!("4".parse::<Tier>().unwrap(), Tier::new(4).unwrap());
        assert!("T9".parse::<Tier>().is_err());
    }

    #[test]
    fn steps_are_signed() {
        let t1 = Tier::new(1).unwrap();
        let t3 = Tier::new(3).unwrap();
        assert_eq!(t1.steps_to(t3), 2);
        assert_eq!(t3.steps_to(t1), -2);
    }

    #[test]
    fn deserializes_from_number_with_validation() {
        let tier: Tier = serde_json::from_str("2").unwrap();
        assert_eq!(tier.get(), 2);
        assert!(serde_json::from_str::<Tier>("7").is_err());
    }
}
