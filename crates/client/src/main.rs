//! Delve headless client binary.
//!
//! Loads the content directory, seeds a session and lets the autopilot play
//! until the player dies, the command budget runs out, or Ctrl-C is pressed.
//!
//! # Examples
//!
//! ```bash
//! DELVE_SEED=7 DELVE_MAX_TURNS=500 RUST_LOG=delve_runtime=debug cargo run -p delve-client
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use delve_client::{Autopilot, ClientConfig, play};
use delve_runtime::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        data_dir = %config.session.data_dir.display(),
        seed = config.session.seed,
        max_turns = config.max_turns,
        "starting delve"
    );

    let mut session = Session::load(&config.session).context("failed to start session")?;
    let stop = Arc::new(AtomicBool::new(false));

    let worker_stop = Arc::clone(&stop);
    let max_turns = config.max_turns;
    let mut run = tokio::task::spawn_blocking(move || {
        let summary = play(&mut session, &Autopilot::new(), max_turns, &worker_stop);
        (session, summary)
    });

    let (session, summary) = tokio::select! {
        finished = &mut run => finished?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, finishing the current turn");
            stop.store(true, Ordering::Relaxed);
            run.await?
        }
    };
    let summary = summary.context("simulation failed")?;

    for entry in session.messages().recent(config.log_tail).collect::<Vec<_>>().iter().rev() {
        println!("{entry}");
    }
    println!();
    println!(
        "{} after {} commands ({} world turns), ending on depth {} ({})",
        if summary.player_alive { "Survived" } else { "Died" },
        summary.commands,
        summary.world_turns,
        summary.depth,
        session.floor_name(),
    );
    Ok(())
}
