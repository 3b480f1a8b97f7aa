//! Rescale a stored actor to a new tier.

use std::sync::Arc;

use tierforge_domain::{ActorId, RescaleOverrides, RescaleResult, Tier};

use crate::infrastructure::ports::{AbilityCatalog, ActorRepo, CatalogAbility, RepoError};
use crate::rules::{ActorRescaler, RescaleError};

/// A computed diff plus catalog entries for the abilities it adds.
#[derive(Debug, Clone, PartialEq)]
pub struct RescalePreview {
    pub result: RescaleResult,
    pub added: Vec<CatalogAbility>,
}

#[derive(Debug, thiserror::Error)]
pub enum RescaleActorError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Rescale(#[from] RescaleError),
}

pub struct RescaleActor {
    actors: Arc<dyn ActorRepo>,
    abilities: Arc<dyn AbilityCatalog>,
    rescaler: Arc<ActorRescaler>,
}

impl RescaleActor {
    pub fn new(
        actors: Arc<dyn ActorRepo>,
        abilities: Arc<dyn AbilityCatalog>,
        rescaler: Arc<ActorRescaler>,
    ) -> Self {
        Self {
            actors,
            abilities,
            rescaler,
        }
    }

    /// Compute the diff without persisting it.
    ///
    /// `Ok(None)` when the actor is already at `target`.
    pub async fn preview(
        &self,
        actor_id: ActorId,
        target: Tier,
        overrides: &RescaleOverrides,
    ) -> Result<Option<RescalePreview>, RescaleActorError> {
        let snapshot = self.actors.get_snapshot(actor_id).await?;
        let Some(mut result) = self.rescaler.rescale(&snapshot, target, overrides)? else {
            return Ok(None);
        };

        let mut added = Vec::new();
        for addition in &mut result.added_abilities {
            match self.abilities.find_by_name(&addition.name) {
                Some(entry) => {
                    addition.description = Some(entry.description.clone());
                    added.push(entry);
                }
                None => {
                    tracing::warn!(ability = %addition.name, "Suggested ability missing from catalog")
                }
            }
        }

        Ok(Some(RescalePreview { result, added }))
    }

    /// Compute the diff and write it back to the actor.
    pub async fn execute(
        &self,
        actor_id: ActorId,
        target: Tier,
        overrides: &RescaleOverrides,
    ) -> Result<Option<RescalePreview>, RescaleActorError> {
        let Some(preview) = self.preview(actor_id, target, overrides).await? else {
            tracing::info!(actor_id = %actor_id, tier = %target, "Actor already at target tier");
            return Ok(None);
        };

        self.actors.apply_diff(actor_id, &preview.result).await?;
        tracing::info!(
            actor_id = %actor_id,
            from = %preview.result.tier.from,
            to = %preview.result.tier.to,
            changes = preview.result.log.len(),
            "Actor rescaled"
        );
        Ok(Some(preview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockAbilityCatalog, MockActorRepo};
    use crate::infrastructure::random::ScriptedRandom;
    use crate::rules::RescaleOptions;
    use crate::test_fixtures::{goblin, test_catalog, tier};

    fn rescaler() -> Arc<ActorRescaler> {
        Arc::new(ActorRescaler::new(
            Arc::new(test_catalog()),
            Arc::new(ScriptedRandom::new([])),
            RescaleOptions::default(),
        ))
    }

    fn relentless_entry() -> CatalogAbility {
        CatalogAbility {
            id: "relentless".into(),
            name: "Relentless (3)".into(),
            icon: None,
            kind: "passive".into(),
            description: "<p>Spotlight up to <strong>3</strong> times.</p>".into(),
        }
    }

    #[tokio::test]
    async fn preview_enriches_additions_without_writing() {
        let goblin = goblin();
        let id = goblin.id;

        let mut repo = MockActorRepo::new();
        repo.expect_get_snapshot()
            .withf(move |actor_id| *actor_id == id)
            .returning(move |_| Ok(goblin.clone()));
        repo.expect_apply_diff().times(0);

        let mut catalog = MockAbilityCatalog::new();
        catalog
            .expect_find_by_name()
            .withf(|name| name == "Relentless (3)")
            .returning(|_| Some(relentless_entry()));

        let use_case = RescaleActor::new(Arc::new(repo), Arc::new(catalog), rescaler());
        let preview = use_case
            .preview(id, tier(3), &RescaleOverrides::default())
            .await
            .expect("preview should succeed")
            .expect("tier changed");

        assert_eq!(preview.added, vec![relentless_entry()]);
        assert_eq!(
            preview.result.added_abilities[0].description.as_deref(),
            Some("<p>Spotlight up to <strong>3</strong> times.</p>")
        );
    }

    #[tokio::test]
    async fn execute_applies_diff() {
        let goblin = goblin();
        let id = goblin.id;

        let mut repo = MockActorRepo::new();
        repo.expect_get_snapshot()
            .returning(move |_| Ok(goblin.clone()));
        repo.expect_apply_diff()
            .withf(move |actor_id, diff| *actor_id == id && diff.tier.to == tier(2))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut catalog = MockAbilityCatalog::new();
        catalog.expect_find_by_name().returning(|_| None);

        let use_case = RescaleActor::new(Arc::new(repo), Arc::new(catalog), rescaler());
        let preview = use_case
            .execute(id, tier(2), &RescaleOverrides::default())
            .await
            .unwrap()
            .unwrap();
        assert!(preview.added.is_empty());
        assert_eq!(preview.result.log[0], "Tier: 1 -> 2");
    }

    #[tokio::test]
    async fn same_tier_writes_nothing() {
        let goblin = goblin();
        let id = goblin.id;

        let mut repo = MockActorRepo::new();
        repo.expect_get_snapshot()
            .returning(move |_| Ok(goblin.clone()));
        repo.expect_apply_diff().times(0);

        let use_case = RescaleActor::new(
            Arc::new(repo),
            Arc::new(MockAbilityCatalog::new()),
            rescaler(),
        );
        let outcome = use_case
            .execute(id, tier(1), &RescaleOverrides::default())
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn unknown_archetype_is_reported() {
        let mut dragon = goblin();
        dragon.archetype = "dragon".into();
        let id = dragon.id;

        let mut repo = MockActorRepo::new();
        repo.expect_get_snapshot()
            .returning(move |_| Ok(dragon.clone()));
        repo.expect_apply_diff().times(0);

        let use_case = RescaleActor::new(
            Arc::new(repo),
            Arc::new(MockAbilityCatalog::new()),
            rescaler(),
        );
        let err = use_case
            .execute(id, tier(2), &RescaleOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RescaleActorError::Rescale(RescaleError::UnknownArchetype(ref tag)) if tag == "dragon"
        ));
    }

    #[tokio::test]
    async fn missing_actor_surfaces_repo_error() {
        let mut repo = MockActorRepo::new();
        repo.expect_get_snapshot()
            .returning(|id| Err(RepoError::not_found("Actor", id)));

        let use_case = RescaleActor::new(
            Arc::new(repo),
            Arc::new(MockAbilityCatalog::new()),
            rescaler(),
        );
        let err = use_case
            .preview(ActorId::new(), tier(2), &RescaleOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RescaleActorError::Repo(RepoError::NotFound { .. })));
    }
}
