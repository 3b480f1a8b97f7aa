//! Benchmark table loading.
//!
//! The built-in table is compiled into the binary; `TIERFORGE_BENCHMARKS_PATH`
//! may point at a replacement file with the same layout.

use std::path::Path;

use thiserror::Error;
use tierforge_domain::{BenchmarkCatalog, DomainError};

const BUILTIN_BENCHMARKS: &str = include_str!("../../data/benchmarks.json");

#[derive(Debug, Error)]
pub enum BenchmarkLoadError {
    #[error("Failed to read benchmark file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse benchmark table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid benchmark table: {0}")]
    Invalid(#[from] DomainError),
}

/// The table shipped with the engine.
pub fn builtin() -> Result<BenchmarkCatalog, BenchmarkLoadError> {
    parse(BUILTIN_BENCHMARKS)
}

/// Read a replacement table from disk.
pub fn from_path(path: &Path) -> Result<BenchmarkCatalog, BenchmarkLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| BenchmarkLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Loading benchmark table from file");
    parse(&text)
}

/// Load the override file when one is configured, otherwise the built-in table.
pub fn load(path: Option<&Path>) -> Result<BenchmarkCatalog, BenchmarkLoadError> {
    match path {
        Some(path) => from_path(path),
        None => builtin(),
    }
}

fn parse(text: &str) -> Result<BenchmarkCatalog, BenchmarkLoadError> {
    let catalog: BenchmarkCatalog = serde_json::from_str(text)?;
    catalog.validate()?;

    // Gaps are reported per rescale as MissingTierBenchmark, so a partial
    // table still loads.
    for (archetype, tier) in catalog.missing_entries() {
        tracing::warn!(archetype = %archetype, tier = tier.get(), "Benchmark table has no row");
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tierforge_domain::{Archetype, Tier};

    #[test]
    fn builtin_table_is_complete() {
        let catalog = builtin().unwrap();
        assert!(catalog.missing_entries().is_empty());
    }

    #[test]
    fn builtin_minion_and_horde_rows_have_their_extras() {
        let catalog = builtin().unwrap();
        for tier in Tier::all() {
            let minion = catalog.get(Archetype::Minion, tier).unwrap();
            assert!(minion.basic_attack_range.is_some());
            assert!(minion.minion_feature_range.is_some());
            assert!(minion.thresholds.is_none());
            assert!(minion.damage_rolls.is_empty());

            let horde = catalog.get(Archetype::Horde, tier).unwrap();
            assert!(!horde.halved_damage_rolls.is_empty());

            let solo = catalog.get(Archetype::Solo, tier).unwrap();
            assert!(solo.halved_damage_rolls.is_empty());
            assert!(solo.thresholds.is_some());
        }
    }

    #[test]
    fn loads_replacement_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "social": {{ "1": {{
                "difficulty": "10", "hp": "3", "stress": "2",
                "attackModifier": "-1",
                "damageRolls": ["1d4+1"],
                "experiences": {{ "count": "2", "modifier": "2" }}
            }} }} }}"#
        )
        .unwrap();

        let catalog = load(Some(file.path())).unwrap();
        assert!(catalog.get(Archetype::Social, Tier::new(1).unwrap()).is_some());
        assert!(!catalog.has_archetype(Archetype::Bruiser));
    }

    #[test]
    fn rejects_malformed_damage_option() {
        let text = r#"{ "social": { "1": {
            "difficulty": "10", "hp": "3", "stress": "2",
            "attackModifier": "-1",
            "damageRolls": ["a lot"],
            "experiences": { "count": "2", "modifier": "2" }
        } } }"#;
        assert!(matches!(parse(text), Err(BenchmarkLoadError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, BenchmarkLoadError::Io { .. }));
    }
}
