//! File-backed actor storage: one pretty-printed JSON snapshot per actor.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tierforge_domain::{ActorId, CreatureSnapshot, RescaleResult};

use crate::infrastructure::ports::{ActorRepo, RepoError};

pub struct JsonActorRepo {
    dir: PathBuf,
}

impl JsonActorRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: ActorId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Write a snapshot, replacing any stored copy.
    pub async fn save(&self, snapshot: &CreatureSnapshot) -> Result<(), RepoError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(self.path_for(snapshot.id), json).await?;
        Ok(())
    }

    /// Every snapshot in the directory. Files that fail to parse are skipped.
    pub async fn list(&self) -> Result<Vec<CreatureSnapshot>, RepoError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut snapshots = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let text = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str::<CreatureSnapshot>(&text) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable actor file")
                }
            }
        }
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshots)
    }
}

#[async_trait]
impl ActorRepo for JsonActorRepo {
    async fn get_snapshot(&self, id: ActorId) -> Result<CreatureSnapshot, RepoError> {
        let text = match tokio::fs::read_to_string(self.path_for(id)).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepoError::not_found("Actor", id));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    async fn apply_diff(&self, id: ActorId, diff: &RescaleResult) -> Result<(), RepoError> {
        let mut snapshot = self.get_snapshot(id).await?;
        snapshot.apply_rescale(diff);
        self.save(&snapshot).await?;
        tracing::info!(
            actor_id = %id,
            from = diff.tier.from.get(),
            to = diff.tier.to.get(),
            "Applied rescale"
        );
        Ok(())
    }
}
