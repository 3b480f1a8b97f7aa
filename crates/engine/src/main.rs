//! Tierforge runner - rescale stored adversaries and score encounters.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tierforge_domain::{ActorId, FearBand, ManualToggles, RescaleOverrides, Tier};
use tierforge_engine::infrastructure::{
    ability_catalog::StaticAbilityCatalog,
    benchmarks,
    json_actor_repo::JsonActorRepo,
    ports::RandomPort,
    random::{SeededRandom, SystemRandom},
    settings::EngineSettings,
};
use tierforge_engine::rules::{ActorRescaler, PartySettings};
use tierforge_engine::use_cases::{EncounterMember, PlanEncounter, RescaleActor};

#[derive(Parser, Debug)]
#[command(name = "tierforge", about = "Adversary tier rescaling and encounter budgets", version)]
struct Cli {
    /// Actor directory (overrides TIERFORGE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// PRNG seed (overrides TIERFORGE_RNG_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move an actor to another tier
    Rescale {
        actor_id: ActorId,
        tier: Tier,
        /// Print the changes without saving them
        #[arg(long)]
        dry_run: bool,
    },
    /// Score actors against a party's battle point budget
    Budget {
        party_count: u32,
        party_tier: u8,
        /// Actor ids, optionally `<id>*<count>` for groups
        #[arg(value_parser = parse_member, required = true)]
        members: Vec<EncounterMember>,
        #[arg(long, default_value = "1-3")]
        fear: FearBand,
        #[arg(long)]
        easier: bool,
        #[arg(long)]
        harder: bool,
        /// Actors whose damage is boosted
        #[arg(long)]
        boost: Vec<ActorId>,
    },
    /// List stored actors
    List,
}

fn parse_member(raw: &str) -> Result<EncounterMember, String> {
    let (id, count) = match raw.split_once('*') {
        Some((id, count)) => (
            id,
            count
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid count in '{}': {}", raw, e))?,
        ),
        None => (raw, 1),
    };
    let actor_id: ActorId = id.parse().map_err(|e| format!("{}", e))?;
    Ok(EncounterMember {
        count,
        ..EncounterMember::new(actor_id)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tierforge=info,tierforge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut settings = EngineSettings::from_env();
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if cli.seed.is_some() {
        settings.rng_seed = cli.seed;
    }

    let repo = Arc::new(JsonActorRepo::new(settings.data_dir.clone()));
    tracing::debug!(dir = %repo.dir().display(), "Using actor directory");

    match cli.command {
        Command::Rescale {
            actor_id,
            tier,
            dry_run,
        } => {
            let catalog = Arc::new(benchmarks::load(settings.benchmarks_path.as_deref())?);
            let random: Arc<dyn RandomPort> = match settings.rng_seed {
                Some(seed) => {
                    tracing::info!(seed, "Using seeded randomness");
                    Arc::new(SeededRandom::new(seed))
                }
                None => Arc::new(SystemRandom::new()),
            };
            let rescaler = Arc::new(ActorRescaler::new(
                catalog,
                random,
                settings.rescale_options(),
            ));
            let use_case = RescaleActor::new(
                repo,
                Arc::new(StaticAbilityCatalog::stock()),
                rescaler,
            );

            let overrides = RescaleOverrides::default();
            let outcome = if dry_run {
                use_case.preview(actor_id, tier, &overrides).await?
            } else {
                use_case.execute(actor_id, tier, &overrides).await?
            };

            match outcome {
                Some(preview) => {
                    for line in &preview.result.log {
                        tracing::info!("{}", line);
                    }
                    for ability in &preview.added {
                        tracing::info!(kind = %ability.kind, "Added ability: {}", ability.name);
                    }
                    if dry_run {
                        tracing::info!("Dry run, nothing saved");
                    }
                }
                None => tracing::info!(tier = %tier, "Actor is already at this tier"),
            }
        }
        Command::Budget {
            party_count,
            party_tier,
            mut members,
            fear,
            easier,
            harder,
            boost,
        } => {
            for member in &mut members {
                member.damage_boost = boost.contains(&member.actor_id);
            }
            let party = PartySettings {
                count: party_count,
                tier: party_tier,
                fear_band: fear,
                toggles: ManualToggles { easier, harder },
            };

            let state = PlanEncounter::new(repo).execute(&members, &party).await?;
            tracing::info!(
                base = state.base_budget,
                limit = state.limit,
                cost = state.cost,
                "Budget: {} of {} battle points",
                state.cost,
                state.limit
            );
            for modifier in &state.modifiers {
                tracing::info!(value = modifier.value(), "Modifier: {}", modifier.description());
            }
            tracing::info!(level = state.level, "Difficulty: {}", state.difficulty);
        }
        Command::List => {
            for snapshot in repo.list().await? {
                tracing::info!(
                    id = %snapshot.id,
                    tier = %snapshot.tier,
                    archetype = %snapshot.archetype,
                    "{}",
                    snapshot.name
                );
            }
        }
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
