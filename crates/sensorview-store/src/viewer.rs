//! Viewer: one tick of the display pipeline.
//!
//! `Viewer` owns the entity store, applies queued commands, normalizes queued
//! sensor messages, sweeps expired entities and walks the result into a draw
//! sink. Completely headless (no threads, no window), so a tick can be driven
//! deterministically from tests.

use std::collections::VecDeque;

use sensorview_core::commands::ViewerCommand;
use sensorview_core::enums::ColorMode;
use sensorview_core::messages::SensorMessage;
use sensorview_core::types::Timestamp;

use crate::store::{EntityStore, StoreStats};
use crate::systems;
use crate::systems::normalize::Outcome;
use crate::systems::render::{DrawSink, RenderContext, RenderStats};
use crate::systems::sweep::SweepStats;

/// Initial display settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerConfig {
    pub color_mode: ColorMode,
    /// Start with message intake frozen.
    pub freeze_frame: bool,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub now: Timestamp,
    /// Messages normalized into the store.
    pub messages: usize,
    /// Messages dropped because the display was frozen.
    pub discarded: usize,
    pub normalize: Outcome,
    pub sweep: SweepStats,
    pub render: RenderStats,
}

/// The viewer. Owns the store and the pending inputs for the next tick.
pub struct Viewer {
    store: EntityStore,
    color_mode: ColorMode,
    freeze_frame: bool,
    message_queue: VecDeque<SensorMessage>,
    command_queue: VecDeque<ViewerCommand>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            store: EntityStore::new(),
            color_mode: config.color_mode,
            freeze_frame: config.freeze_frame,
            message_queue: VecDeque::new(),
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a sensor message for the next tick.
    pub fn queue_message(&mut self, message: SensorMessage) {
        self.message_queue.push_back(message);
    }

    /// Queue a viewer command for the next tick boundary.
    pub fn queue_command(&mut self, command: ViewerCommand) {
        self.command_queue.push_back(command);
    }

    /// Run one tick at time `now` and draw the surviving entities into `sink`.
    pub fn tick<S: DrawSink + ?Sized>(&mut self, now: Timestamp, sink: &mut S) -> TickReport {
        let mut report = TickReport {
            now,
            ..Default::default()
        };

        self.process_commands();
        self.process_messages(now, &mut report);

        report.sweep = systems::sweep::run(&mut self.store, now);
        if report.sweep.total() > 0 {
            log::debug!(
                "t={} swept {} objects, {} containers, {} parents",
                now,
                report.sweep.objects,
                report.sweep.containers,
                report.sweep.parents
            );
        }

        let context = RenderContext {
            color_mode: self.color_mode,
        };
        report.render = systems::render::run(&self.store, &context, sink);

        report
    }

    /// Drop every pending message and command without processing them.
    /// Returns how many messages were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.message_queue.len();
        self.message_queue.clear();
        self.command_queue.clear();
        dropped
    }

    /// Discard pending input and release the whole hierarchy.
    pub fn shutdown(&mut self) -> StoreStats {
        let dropped = self.discard_pending();
        if dropped > 0 {
            log::info!("discarded {} unprocessed messages", dropped);
        }
        self.store.release_all()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn freeze_frame(&self) -> bool {
        self.freeze_frame
    }

    pub fn pending_messages(&self) -> usize {
        self.message_queue.len()
    }

    /// Apply all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::SetColorMode { mode } => {
                self.color_mode = mode;
            }
            ViewerCommand::CycleColorMode => {
                self.color_mode = self.color_mode.next();
            }
            ViewerCommand::SetFreezeFrame { enabled } => {
                self.freeze_frame = enabled;
            }
            ViewerCommand::ToggleFreezeFrame => {
                self.freeze_frame = !self.freeze_frame;
            }
            ViewerCommand::ClearAll => {
                self.store.release_all();
            }
        }
    }

    /// Normalize every queued message, or discard them all while frozen.
    fn process_messages(&mut self, now: Timestamp, report: &mut TickReport) {
        while let Some(message) = self.message_queue.pop_front() {
            if self.freeze_frame {
                report.discarded += 1;
                continue;
            }
            let outcome = systems::normalize::apply(&mut self.store, &message, now);
            report.normalize.merge(outcome);
            report.messages += 1;
        }
    }
}
