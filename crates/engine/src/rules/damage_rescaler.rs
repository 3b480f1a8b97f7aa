//! Recomputes a damage formula when a creature changes tier.

use tierforge_domain::{Change, DamageFormula, FormulaParseError, Tier};

use super::range_roller::roll_uniform;
use crate::infrastructure::ports::RandomPort;

/// Where the target tier's damage comes from.
#[derive(Debug, Clone, Copy)]
pub enum DamageSource<'a> {
    /// Candidate formulas from the benchmark row
    Options(&'a [String]),
    /// Flat damage range (minion basic attacks)
    FlatRange(&'a str),
}

/// Rescales damage from one tier to another.
#[derive(Debug, Clone, Copy)]
pub struct DamageRescaler {
    current_tier: Tier,
    target_tier: Tier,
}

impl DamageRescaler {
    pub fn new(current_tier: Tier, target_tier: Tier) -> Self {
        Self {
            current_tier,
            target_tier,
        }
    }

    pub fn steps(&self) -> i32 {
        self.current_tier.steps_to(self.target_tier)
    }

    /// Pick the target-tier formula for `current`.
    ///
    /// Flat values move by two per tier. Dice formulas take the first
    /// option with the same die, else the first option, else a synthesized
    /// `{tier}d12+{tier*2}`.
    pub fn rescale(&self, current: &DamageFormula, options: &[String]) -> DamageFormula {
        let next = if current.is_flat() {
            DamageFormula::flat(current.bonus + self.steps() * 2)
        } else {
            let parsed: Vec<DamageFormula> = options
                .iter()
                .filter_map(|option| DamageFormula::parse(option).ok())
                .collect();
            parsed
                .iter()
                .find(|option| option.die == current.die)
                .or_else(|| parsed.first())
                .copied()
                .unwrap_or_else(|| {
                    let tier = i32::from(self.target_tier.get());
                    DamageFormula::dice(u32::from(self.target_tier.get()), 12, tier * 2)
                })
        };
        self.floor_bonus(current, next)
    }

    /// Rescale against either source. `None` only when a flat range does
    /// not roll.
    pub fn rescale_with(
        &self,
        current: &DamageFormula,
        source: DamageSource<'_>,
        rng: &dyn RandomPort,
    ) -> Option<DamageFormula> {
        match source {
            DamageSource::Options(options) => Some(self.rescale(current, options)),
            DamageSource::FlatRange(range) => {
                let value = roll_uniform(range, rng)?;
                Some(self.floor_bonus(current, DamageFormula::flat(value)))
            }
        }
    }

    /// Parse stored text, rescale it, and report the change if the
    /// canonical text moved.
    pub fn rescale_text(
        &self,
        text: &str,
        source: DamageSource<'_>,
        rng: &dyn RandomPort,
    ) -> Result<Option<Change<String>>, FormulaParseError> {
        let current = DamageFormula::parse(text)?;
        Ok(self
            .rescale_with(&current, source, rng)
            .and_then(|next| diff(text, &current, &next)))
    }

    /// Going up a tier never lowers the bonus.
    fn floor_bonus(&self, current: &DamageFormula, mut next: DamageFormula) -> DamageFormula {
        if self.steps() > 0 && next.bonus < current.bonus {
            next.bonus = current.bonus;
        }
        next
    }
}

/// `Some(from -> to)` unless both formulas format identically.
pub fn diff(from_text: &str, current: &DamageFormula, next: &DamageFormula) -> Option<Change<String>> {
    let to = next.display();
    if to == current.display() {
        None
    } else {
        Some(Change::new(from_text.trim().to_string(), to))
    }
}
