// Draft runner entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Ensure config files exist, load config
// 3. Load the item catalog
// 4. Build the participant list (CLI args, or simulated stand-ins)
// 5. Initialize DraftState and the orchestrator
// 6. Spawn the Ctrl+C watcher
// 7. Drive the session to completion

use gachadraft::catalog;
use gachadraft::config;
use gachadraft::draft::state::{DraftMode, DraftState, Participant};
use gachadraft::messaging::ConsoleMessenger;
use gachadraft::orchestrator::Orchestrator;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Draft runner starting up");

    // 2. Load config (copying packaged defaults on first run)
    let base_dir = std::env::current_dir()?;
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} picks, {} point cap, {} rerolls, {} tiers",
        config.total_picks,
        config.max_points,
        config.max_rerolls,
        config.tier_probs.len()
    );

    // 3. Load the item catalog. A missing or broken catalog is fatal for
    // drafting but not for the process; the session would just find no
    // candidates, which the loop reports per turn.
    let catalog_path = base_dir.join(&config.catalog_path);
    let catalog = match catalog::Catalog::load(&catalog_path) {
        Ok(catalog) => {
            info!("Catalog loaded: {} items", catalog.len());
            catalog
        }
        Err(e) => {
            error!("FATAL: could not load catalog from {:?}: {}", catalog_path, e);
            catalog::Catalog::from_rows(Vec::new()).context("empty catalog")?
        }
    };

    // 4. Participants: names from the command line, or four simulated
    // stand-ins for a demo run.
    let names: Vec<String> = std::env::args().skip(1).collect();
    let participants: Vec<Participant> = if names.is_empty() {
        (1..=4)
            .map(|i| Participant::simulated(i, format!("Bot_{i}")))
            .collect()
    } else {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Participant::real(i as u64 + 1, name.clone()))
            .collect()
    };
    info!(
        "Participants: {}",
        participants
            .iter()
            .map(|p| p.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // 5. Fresh session state. The console has no buttons, so prompts resolve
    // as timeouts; public auto mode keeps the output readable.
    let mut state = DraftState::new(participants);
    state.mode = DraftMode::AutoPublic;

    let messenger = Arc::new(ConsoleMessenger::new());
    let (mut orchestrator, handle) = Orchestrator::new(config, catalog, messenger);

    // 6. Ctrl+C cancels the session; the loop observes the token at its next
    // suspension point and winds down cleanly.
    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, cancelling the session");
            shutdown.cancel();
        }
    });

    // 7. Drive the session
    orchestrator.run(&mut state).await?;

    info!("Draft runner shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file, keeping stdout free for the console
/// messenger.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gachadraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gachadraft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
