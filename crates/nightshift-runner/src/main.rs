//! Headless session runner for the Nightshift simulation.
//!
//! Loads `nightshift.yaml` (or the path given as the first argument),
//! opens the save slot, and runs the shift: the state is ticked on a fixed
//! interval while commands typed on stdin run actions, move the player, and
//! export or import transfer strings.
//!
//! # Architecture
//!
//! ```text
//! interval --> Session::tick --> engine advance --> content deck --> notifications
//! stdin    --> Command::parse --> Session::execute --> engine process_action
//! ```
//!
//! The slot is saved every `storage.autosave_secs`, on `:quit`, on ctrl-c,
//! and when `session.max_ticks` is reached.

mod config;
mod content;
mod error;
mod session;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::RunnerConfig;
use crate::session::{Command, Reply, Session};

const DEFAULT_CONFIG: &str = "nightshift.yaml";

/// Application entry point.
///
/// Loads configuration, initializes logging, opens the session, then runs
/// the tick and command loop until `:quit`, ctrl-c, or the tick limit.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the final save fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = RunnerConfig::load_or_default(&config_path)?;

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %config_path.display(),
        seed = ?config.session.seed,
        tick_interval_ms = config.session.tick_interval_ms,
        max_ticks = ?config.session.max_ticks,
        "nightshift-runner starting"
    );

    let mut session = Session::open(&config)?;
    info!(
        location = %session.location(),
        level = session.state().resources.level,
        "Shift started, type :help for commands"
    );
    run(&mut session, &config).await;

    session.save()?;
    info!(ticks = session.ticks(), "Shift over, slot saved");
    Ok(())
}

/// Drive the session until it is told to stop.
async fn run(session: &mut Session, config: &RunnerConfig) {
    let mut ticker = tokio::time::interval(Duration::from_millis(
        config.session.tick_interval_ms.max(1),
    ));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let autosave_every = Duration::from_secs(config.storage.autosave_secs.max(1));
    let mut autosave = tokio::time::interval_at(Instant::now() + autosave_every, autosave_every);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let delta_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
                last_tick = now;
                for n in session.tick(delta_ms, Utc::now().timestamp_millis()) {
                    println!("[{}] {}", n.title, n.message.unwrap_or_default());
                }
                if config.session.max_ticks.is_some_and(|max| session.ticks() >= max) {
                    info!(ticks = session.ticks(), "Tick limit reached");
                    break;
                }
            }
            _ = autosave.tick() => {
                if let Err(e) = session.save() {
                    warn!(error = %e, "Autosave failed");
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_line(session, &line) {
                            break;
                        }
                    }
                    Ok(None) => {
                        info!("stdin closed, running on the clock");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }
}

/// Parse and execute one input line, printing the outcome. Returns `false`
/// when the session should stop.
fn handle_line(session: &mut Session, line: &str) -> bool {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(e) => {
            println!("{e}");
            return true;
        }
    };
    match session.execute(command, Utc::now().timestamp_millis()) {
        Ok(Reply::Text(text)) => {
            if !text.is_empty() {
                println!("{text}");
            }
            true
        }
        Ok(Reply::Quit) => false,
        Err(e) => {
            println!("{e}");
            true
        }
    }
}
