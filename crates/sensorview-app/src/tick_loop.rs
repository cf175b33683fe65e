//! Tick-loop thread: drains the inbound queue, ticks the viewer and draws.
//!
//! The viewer is created inside this thread and never shared; the store has no
//! locks because only this thread touches it. Inputs arrive through a bounded
//! `mpsc::sync_channel`. Cancellation is a flag checked at the top of each tick:
//! once set, whatever is still queued is discarded and the store released.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use sensorview_core::types::Timestamp;
use sensorview_store::store::StoreStats;
use sensorview_store::systems::render::DrawSink;
use sensorview_store::viewer::{Viewer, ViewerConfig};

use crate::state::{CancelToken, LoopInput};

/// Settings for one tick-loop run.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub tick_rate_hz: u32,
    pub queue_capacity: usize,
    pub viewer: ViewerConfig,
}

/// What a finished loop did over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    /// Messages normalized into the store.
    pub messages: u64,
    /// Messages dropped while frozen or left queued at shutdown.
    pub discarded: u64,
    /// Objects created or merged.
    pub upserts: u64,
    /// Upserts rejected by the store.
    pub failed_upserts: u64,
    /// Entities released by the final teardown.
    pub released: StoreStats,
}

/// Handle to a running tick loop.
pub struct TickLoopHandle<S> {
    sender: SyncSender<LoopInput>,
    cancel: CancelToken,
    join: JoinHandle<(LoopSummary, S)>,
}

impl<S> TickLoopHandle<S> {
    /// A sender for the bounded inbound queue.
    pub fn sender(&self) -> SyncSender<LoopInput> {
        self.sender.clone()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Request cancellation and wait for the thread to finish its teardown.
    /// Returns `None` if the loop thread panicked.
    pub fn shutdown(self) -> Option<(LoopSummary, S)> {
        self.cancel.cancel();
        drop(self.sender);
        self.join.join().ok()
    }
}

/// Duration of one tick at the given rate.
pub fn tick_duration(tick_rate_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate_hz.max(1)))
}

/// Spawns the tick loop in a new thread, drawing into `sink`.
pub fn spawn_tick_loop<S>(config: LoopConfig, sink: S) -> TickLoopHandle<S>
where
    S: DrawSink + Send + 'static,
{
    let (sender, receiver) = mpsc::sync_channel::<LoopInput>(config.queue_capacity.max(1));
    let cancel = CancelToken::new();
    let thread_cancel = cancel.clone();

    let join = std::thread::Builder::new()
        .name("sensorview-tick-loop".into())
        .spawn(move || {
            let mut sink = sink;
            let summary = run_tick_loop(&config, &receiver, &thread_cancel, &mut sink);
            (summary, sink)
        })
        .expect("Failed to spawn tick loop thread");

    TickLoopHandle {
        sender,
        cancel,
        join,
    }
}

/// The tick loop. Runs until cancelled or every sender is gone.
pub fn run_tick_loop<S: DrawSink + ?Sized>(
    config: &LoopConfig,
    receiver: &Receiver<LoopInput>,
    cancel: &CancelToken,
    sink: &mut S,
) -> LoopSummary {
    let mut viewer = Viewer::new(config.viewer);
    let mut summary = LoopSummary::default();
    let tick = tick_duration(config.tick_rate_hz);
    let start = Instant::now();
    let mut next_tick_time = start;

    log::info!(
        "tick loop started at {} Hz, queue capacity {}",
        config.tick_rate_hz,
        config.queue_capacity
    );

    loop {
        // 1. Cooperative cancellation
        if cancel.is_cancelled() {
            break;
        }

        // 2. Drain whatever is queued without blocking
        let mut disconnected = false;
        loop {
            match receiver.try_recv() {
                Ok(LoopInput::Message(message)) => viewer.queue_message(message),
                Ok(LoopInput::Command(command)) => viewer.queue_command(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        // 3. Normalize, sweep, draw
        let report = viewer.tick(elapsed_micros(start), sink);
        summary.ticks += 1;
        summary.messages += report.messages as u64;
        summary.discarded += report.discarded as u64;
        summary.upserts += report.normalize.upserted as u64;
        summary.failed_upserts += report.normalize.failed as u64;

        if disconnected {
            log::info!("inbound queue closed");
            break;
        }

        // 4. Sleep until the next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }

    // Teardown: queued input is dropped unprocessed.
    let mut dropped = 0u64;
    while let Ok(input) = receiver.try_recv() {
        if matches!(input, LoopInput::Message(_)) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::info!("discarded {} queued messages at shutdown", dropped);
    }
    summary.discarded += dropped;
    summary.discarded += viewer.pending_messages() as u64;
    summary.released = viewer.shutdown();

    log::info!(
        "tick loop stopped after {} ticks: {} messages, {} upserts, released {} parents / {} containers / {} objects",
        summary.ticks,
        summary.messages,
        summary.upserts,
        summary.released.parents,
        summary.released.containers,
        summary.released.objects
    );

    summary
}

fn elapsed_micros(start: Instant) -> Timestamp {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
