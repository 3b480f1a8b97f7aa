//! Random implementations.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Seeded random - the same seed replays the same rolls.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(min..=max)
    }
}

/// Scripted random for testing: replays queued values (clamped into the
/// requested range), then falls back to the lower bound.
pub struct ScriptedRandom {
    values: Mutex<VecDeque<i32>>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomPort for ScriptedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        let next = self
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.map_or(min, |v| v.clamp(min, max.max(min)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_replays() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let rolls_a: Vec<i32> = (0..20).map(|_| a.gen_range(1, 100)).collect();
        let rolls_b: Vec<i32> = (0..20).map(|_| b.gen_range(1, 100)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|r| (1..=100).contains(r)));
    }

    #[test]
    fn system_random_stays_in_range() {
        let rng = SystemRandom::new();
        for _ in 0..200 {
            let roll = rng.gen_range(-4, 0);
            assert!((-4..=0).contains(&roll));
        }
        assert_eq!(rng.gen_range(3, 3), 3);
    }

    #[test]
    fn scripted_random_clamps_then_falls_back() {
        let rng = ScriptedRandom::new([9, 2]);
        assert_eq!(rng.gen_range(5, 7), 7);
        assert_eq!(rng.gen_range(5, 7), 5);
        assert_eq!(rng.gen_range(5, 7), 5);
    }
}
