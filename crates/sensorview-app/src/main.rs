use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender};
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use sensorview_app::config::{AppConfig, ConfigError};
use sensorview_app::feed::{self, FeedError, FeedOptions, FeedStats};
use sensorview_app::sink::LogSink;
use sensorview_app::state::{CancelToken, LoopInput};
use sensorview_app::tick_loop::{spawn_tick_loop, LoopConfig};

/// Multi-sensor situational viewer fed by JSON-lines sensor messages.
#[derive(Debug, Parser)]
#[command(name = "sensorview", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read messages from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Override the configured tick rate (Hz).
    #[arg(long)]
    tick_rate: Option<u32>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot open input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("cannot install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("cannot start feed thread: {0}")]
    FeedThread(#[source] io::Error),

    #[error("tick loop thread panicked")]
    LoopPanicked,

    #[error("feed thread panicked")]
    FeedPanicked,
}

/// How often `main` checks for an interrupt while the feed runs.
const FEED_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(rate) = cli.tick_rate {
        config.tick_rate_hz = rate;
        config.validate()?;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    let handle = spawn_tick_loop(
        LoopConfig {
            tick_rate_hz: config.tick_rate_hz,
            queue_capacity: config.queue_capacity,
            viewer: config.viewer_config(),
        },
        LogSink::new(),
    );

    // Ctrl-C cancels the tick loop; teardown then runs on the loop thread.
    let cancel = handle.cancel_token();
    let interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        log::info!("interrupt received, shutting down");
        interrupt.cancel();
    })?;

    let reader: Box<dyn BufRead + Send> = match &cli.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| AppError::Input {
                path: path.clone(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };
    let options = FeedOptions {
        own_source_id: config.own_source_id,
    };
    let feed_result = run_feed(reader, handle.sender(), options, &cancel)?;

    match &feed_result {
        Some(Ok(stats)) => log::info!(
            "input finished: {} lines, {} forwarded, {} malformed, {} ignored, {} dropped",
            stats.lines,
            stats.forwarded,
            stats.malformed,
            stats.ignored,
            stats.dropped
        ),
        Some(Err(err)) => log::warn!("input stopped early: {}", err),
        None => log::info!("input abandoned"),
    }

    // Keep drawing so the last detections age out on screen.
    cancel.wait(Duration::from_millis(config.linger_ms));

    let (summary, sink) = handle.shutdown().ok_or(AppError::LoopPanicked)?;
    let counts = sink.counts();
    log::info!(
        "{} ticks, {} messages, {} discarded, {} failed upserts, {} primitives drawn ({} points)",
        summary.ticks,
        summary.messages,
        summary.discarded,
        summary.failed_upserts,
        counts.primitives(),
        counts.points
    );

    if let Some(result) = feed_result {
        result?;
    }
    Ok(())
}

/// Pump `reader` on its own thread so an interrupt is noticed even while the
/// input blocks. Returns `None` if cancelled before the input finished.
fn run_feed(
    reader: Box<dyn BufRead + Send>,
    sender: SyncSender<LoopInput>,
    options: FeedOptions,
    cancel: &CancelToken,
) -> Result<Option<Result<FeedStats, FeedError>>, AppError> {
    let (done_tx, done_rx) = mpsc::channel();
    let feed_cancel = cancel.clone();
    std::thread::Builder::new()
        .name("sensorview-feed".into())
        .spawn(move || {
            let result = feed::pump(reader, &sender, options, &feed_cancel);
            // Receiver may be gone after an interrupt.
            let _ = done_tx.send(result);
        })
        .map_err(AppError::FeedThread)?;

    loop {
        match done_rx.recv_timeout(FEED_POLL) {
            Ok(result) => return Ok(Some(result)),
            Err(RecvTimeoutError::Timeout) if cancel.is_cancelled() => return Ok(None),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(AppError::FeedPanicked),
        }
    }
}
