//! Runtime settings read from the environment.

use std::path::PathBuf;

use crate::rules::RescaleOptions;

const DEFAULT_DATA_DIR: &str = "./data/actors";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Replacement benchmark table; the built-in one is used when unset
    pub benchmarks_path: Option<PathBuf>,
    /// Seed for a replayable PRNG
    pub rng_seed: Option<u64>,
    pub scale_experiences: bool,
    pub suggest_abilities: bool,
    /// Directory of the JSON actor repository
    pub data_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            benchmarks_path: None,
            rng_seed: None,
            scale_experiences: true,
            suggest_abilities: true,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to
    /// their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let flag = |key: &str, default: bool| {
            value(key)
                .map(|raw| parse_flag(key, &raw, default))
                .unwrap_or(default)
        };

        let rng_seed = value("TIERFORGE_RNG_SEED").and_then(|raw| match raw.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!(value = %raw, "TIERFORGE_RNG_SEED is not a u64, ignoring");
                None
            }
        });

        Self {
            benchmarks_path: value("TIERFORGE_BENCHMARKS_PATH").map(PathBuf::from),
            rng_seed,
            scale_experiences: flag("TIERFORGE_SCALE_EXPERIENCES", defaults.scale_experiences),
            suggest_abilities: flag("TIERFORGE_SUGGEST_ABILITIES", defaults.suggest_abilities),
            data_dir: value("TIERFORGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }

    pub fn rescale_options(&self) -> RescaleOptions {
        RescaleOptions {
            scale_experiences: self.scale_experiences,
            add_suggested_ability: self.suggest_abilities,
        }
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, "Unrecognized boolean, using default");
            default
        }
    }
}
