//! Lastseen Daemon (`lastseend`)
//!
//! Headless host for the presence tracker. Polls a roster file on every
//! heartbeat and keeps last-seen timestamps in a local redb store.

mod config;
mod roster;
mod runner;

use clap::{Parser, Subcommand};
use config::DaemonConfig;
use lastseen_core::PresenceTracker;
use lastseen_model::{normalize_display_name, Clock, SystemClock};
use lastseen_store::{LastSeenDb, LastSeenStore};
use roster::RosterSource;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lastseend", version, about = "Last-seen presence tracker")]
struct Args {
    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long, global = true)]
    in_memory: bool,

    /// Seconds a cached store read stays valid (0 disables the cache)
    #[arg(long, default_value_t = config::DEFAULT_CACHE_TTL_SECS, global = true)]
    cache_ttl_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Track presence from a roster file until interrupted
    Run {
        /// Roster file (defaults to <data-dir>/roster.txt)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Heartbeat interval in milliseconds
        #[arg(long, default_value_t = config::DEFAULT_TICK_MS)]
        tick_ms: u64,

        /// Flush the buffer every N heartbeats
        #[arg(long, default_value_t = lastseen_core::TrackerConfig::DEFAULT_FLUSH_INTERVAL_TICKS)]
        flush_every: u64,
    },
    /// Print when a peer was last seen online (stop `run` first: it holds the store lock)
    Query {
        name: String,
    },
    /// Print every stored record (stop `run` first: it holds the store lock)
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = DaemonConfig::new(args.data_dir, args.in_memory)
        .with_cache_ttl_secs(args.cache_ttl_secs);

    match args.command {
        Command::Run { roster, tick_ms, flush_every } => {
            let config = config
                .with_roster(roster)
                .with_tick_ms(tick_ms)
                .with_flush_every(flush_every);
            run(config).await
        }
        Command::Query { name } => query(&config, &name),
        Command::List => list(&config),
    }
}

async fn run(config: DaemonConfig) -> anyhow::Result<()> {
    tracing::info!("lastseend v{} starting...", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config)?;
    let mut tracker = PresenceTracker::new(
        RosterSource::new(&config.roster),
        store,
        Arc::new(SystemClock),
        config.tracker,
    );

    tracing::info!("Data: {}", config.data_dir.base().display());
    tracing::info!("Roster: {}", config.roster.display());
    tracing::info!("Daemon ready. Press Ctrl+C to stop.");

    let report =
        runner::run_heartbeats(&mut tracker, config.tick_interval, shutdown_signal()).await;

    tracing::info!(written = report.written, failed = report.failed, "Daemon stopped");
    Ok(())
}

/// Reads flushed records only; entries still buffered in a running tracker
/// are not visible here.
fn query(config: &DaemonConfig, name: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let identity = normalize_display_name(name);

    match store.get(&identity)? {
        Some(ts) => {
            let minutes = SystemClock.now_ms().saturating_sub(ts) / 60_000;
            println!("{identity}: {ts} ({minutes} minutes ago)");
        }
        None => println!("{identity}: unknown"),
    }
    Ok(())
}

fn list(config: &DaemonConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    for (identity, ts) in store.list_all()? {
        println!("{ts}\t{identity}");
    }
    Ok(())
}

fn open_store(config: &DaemonConfig) -> anyhow::Result<Arc<LastSeenDb>> {
    if config.storage.state_dir().is_some() {
        config.data_dir.ensure_dirs()?;
    }
    let store = LastSeenDb::open(&config.storage, config.store.clone()).map_err(|e| {
        tracing::error!("Failed to open store: {}", e);
        if e.is_already_open() {
            anyhow::anyhow!("store is locked by a running `lastseend run`; stop it first")
        } else {
            anyhow::anyhow!("{}", e)
        }
    })?;
    Ok(Arc::new(store))
}

fn init_tracing(verbosity: u8) {
    let mut filter = EnvFilter::from_default_env();

    // Only apply defaults if RUST_LOG is not set
    if std::env::var("RUST_LOG").is_err() {
        let level = match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        if let Ok(directive) = level.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
    }
    tracing::info!("Shutdown signal received...");
}
