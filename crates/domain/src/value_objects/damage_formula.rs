//! Damage formula value object and parsing
//!
//! Accepts dice notation like "3d8+6", "2d6-1", "d12" as well as a bare
//! integer for flat damage ("12"). Formatting is canonical, so any formula
//! written the canonical way formats back to the same text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when parsing a damage formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaParseError {
    /// The formula string is empty
    #[error("Empty damage formula")]
    Empty,
    /// Invalid format - expected N, XdY, XdY+Z or XdY-Z
    #[error("Invalid damage format: {0}")]
    InvalidFormat(String),
    /// Die size must be at least 1
    #[error("Die size must be at least 1")]
    InvalidDieSize,
}

/// A parsed damage formula like "2d6+3", or a flat value like "7".
///
/// Flat formulas keep their value in `bonus` with `count == 0` and
/// `die == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageFormula {
    /// Number of dice (X in XdY); zero for flat values
    pub count: u32,
    /// Size of each die (Y in XdY); `None` for flat values
    pub die: Option<u32>,
    /// Signed modifier, or the whole value for flat formulas
    pub bonus: i32,
}

impl DamageFormula {
    /// A flat (non-dice) damage value.
    pub fn flat(value: i32) -> Self {
        Self {
            count: 0,
            die: None,
            bonus: value,
        }
    }

    /// A dice formula `{count}d{die}{bonus:+}`.
    pub fn dice(count: u32, die: u32, bonus: i32) -> Self {
        Self {
            count,
            die: Some(die),
            bonus,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.die.is_none()
    }

    /// Parse a damage formula string.
    ///
    /// Supported formats:
    /// - "N" - flat damage N
    /// - "XdY" - X dice of size Y
    /// - "XdY+Z" / "XdY-Z" - with a signed bonus
    /// - "dY" - one die of size Y (shorthand)
    ///
    /// Whitespace anywhere in the input is ignored ("2d6 + 3").
    pub fn parse(input: &str) -> Result<Self, FormulaParseError> {
        let input: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if input.is_empty() {
            return Err(FormulaParseError::Empty);
        }

        let Some(d_pos) = input.find('d') else {
            if !is_signed_integer(&input) {
                return Err(FormulaParseError::InvalidFormat(format!(
                    "Not a dice formula or integer: '{}'",
                    input
                )));
            }
            let value: i32 = input.parse().map_err(|_| {
                FormulaParseError::InvalidFormat(format!("Flat value out of range: '{}'", input))
            })?;
            return Ok(Self::flat(value));
        };

        let count_str = &input[..d_pos];
        let count: u32 = if count_str.is_empty() {
            1
        } else if count_str.bytes().all(|b| b.is_ascii_digit()) {
            count_str.parse().map_err(|_| {
                FormulaParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
            })?
        } else {
            return Err(FormulaParseError::InvalidFormat(format!(
                "Invalid dice count: '{}'",
                count_str
            )));
        };

        let after_d = &input[d_pos + 1..];
        let sign_pos = after_d.find(['+', '-']);
        let (die_str, bonus) = match sign_pos {
            Some(pos) => {
                let bonus_str = &after_d[pos..];
                if !is_signed_integer(bonus_str) {
                    return Err(FormulaParseError::InvalidFormat(format!(
                        "Invalid bonus: '{}'",
                        bonus_str
                    )));
                }
                let bonus: i32 = bonus_str.parse().map_err(|_| {
                    FormulaParseError::InvalidFormat(format!("Invalid bonus: '{}'", bonus_str))
                })?;
                (&after_d[..pos], bonus)
            }
            None => (after_d, 0),
        };

        if die_str.is_empty() || !die_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormulaParseError::InvalidFormat(format!(
                "Invalid die size: '{}'",
                die_str
            )));
        }
        let die: u32 = die_str.parse().map_err(|_| {
            FormulaParseError::InvalidFormat(format!("Invalid die size: '{}'", die_str))
        })?;
        if die == 0 {
            return Err(FormulaParseError::InvalidDieSize);
        }

        Ok(Self::dice(count, die, bonus))
    }

    /// Format as canonical text ("3d8+6", "1d8", "2d6-1", "12").
    pub fn display(&self) -> String {
        match self.die {
            None => self.bonus.to_string(),
            Some(die) if self.bonus > 0 => format!("{}d{}+{}", self.count, die, self.bonus),
            Some(die) if self.bonus < 0 => format!("{}d{}{}", self.count, die, self.bonus),
            Some(die) => format!("{}d{}", self.count, die),
        }
    }
}

fn is_signed_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for DamageFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for DamageFormula {
    type Err = FormulaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
