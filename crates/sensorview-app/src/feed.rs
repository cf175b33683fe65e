//! JSON-lines message feed.
//!
//! Stands in for the message bus: each input line is either a sensor message
//! (`{"kind": "radar_targets", ...}`) or a viewer command
//! (`{"command": {"type": "CycleColorMode"}}`). Parsed inputs are pushed onto the
//! bounded queue without blocking; when the queue is full the input is dropped.

use std::io::BufRead;
use std::sync::mpsc::{SyncSender, TrySendError};

use serde::Deserialize;
use thiserror::Error;

use sensorview_core::commands::ViewerCommand;
use sensorview_core::messages::SensorMessage;

use crate::state::{CancelToken, LoopInput};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// One line of feed input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedLine {
    Command { command: ViewerCommand },
    Message(SensorMessage),
}

/// Feed behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedOptions {
    /// Messages whose source id equals this are not forwarded.
    pub own_source_id: Option<u64>,
}

/// Counts for one feed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub lines: u64,
    pub forwarded: u64,
    /// Lines that were not valid feed input.
    pub malformed: u64,
    /// Messages from this viewer's own source.
    pub ignored: u64,
    /// Inputs dropped because the queue was full.
    pub dropped: u64,
}

/// Read `reader` to the end, forwarding every parsed input to `sender`.
///
/// Stops early if the receiving side has gone away or `cancel` is set.
pub fn pump<R: BufRead>(
    reader: R,
    sender: &SyncSender<LoopInput>,
    options: FeedOptions,
    cancel: &CancelToken,
) -> Result<FeedStats, FeedError> {
    let mut stats = FeedStats::default();

    for line in reader.lines() {
        if cancel.is_cancelled() {
            log::debug!("feed cancelled after {} lines", stats.lines);
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.lines += 1;

        let input = match serde_json::from_str::<FeedLine>(trimmed) {
            Ok(FeedLine::Command { command }) => LoopInput::Command(command),
            Ok(FeedLine::Message(message)) => {
                let own = options.own_source_id;
                if own.is_some() && message.header().map(|h| h.source_id) == own {
                    stats.ignored += 1;
                    continue;
                }
                LoopInput::Message(message)
            }
            Err(err) => {
                log::warn!("skipping malformed line {}: {}", stats.lines, err);
                stats.malformed += 1;
                continue;
            }
        };

        match sender.try_send(input) {
            Ok(()) => stats.forwarded += 1,
            Err(TrySendError::Full(_)) => {
                log::warn!("inbound queue full, dropping line {}", stats.lines);
                stats.dropped += 1;
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("tick loop gone, stopping feed");
                break;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    const RADAR: &str = r#"{"kind":"radar_targets","header":{"source_id":5,"sensor_id":1},"targets":[{"id":1,"track_status":"new"}]}"#;

    #[test]
    fn test_pump_forwards_messages_and_commands() {
        let input = format!(
            "{}\n\n{}\n{}\n",
            RADAR,
            r#"{"command":{"type":"CycleColorMode"}}"#,
            r#"{"kind":"heartbeat"}"#
        );
        let (tx, rx) = mpsc::sync_channel(8);
        let stats = pump(
            Cursor::new(input),
            &tx,
            FeedOptions::default(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.forwarded, 3);

        let inputs: Vec<LoopInput> = rx.try_iter().collect();
        assert!(matches!(
            inputs[0],
            LoopInput::Message(SensorMessage::RadarTargets(_))
        ));
        assert!(matches!(
            inputs[1],
            LoopInput::Command(ViewerCommand::CycleColorMode)
        ));
        assert!(matches!(inputs[2], LoopInput::Message(SensorMessage::Unknown)));
    }

    #[test]
    fn test_pump_skips_malformed_lines() {
        let input = format!("not json\n{}\n{{\"targets\": []}}\n", RADAR);
        let (tx, rx) = mpsc::sync_channel(8);
        let stats = pump(
            Cursor::new(input),
            &tx,
            FeedOptions::default(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(stats.malformed, 2);
        assert_eq!(stats.forwarded, 1);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_pump_ignores_own_source() {
        let (tx, rx) = mpsc::sync_channel(8);
        let options = FeedOptions {
            own_source_id: Some(5),
        };
        let stats = pump(
            Cursor::new(RADAR),
            &tx,
            options,
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.forwarded, 0);
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_pump_drops_when_queue_full() {
        let input = format!("{}\n{}\n{}\n", RADAR, RADAR, RADAR);
        let (tx, rx) = mpsc::sync_channel(1);
        let stats = pump(
            Cursor::new(input),
            &tx,
            FeedOptions::default(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(stats.forwarded, 1);
        assert_eq!(stats.dropped, 2);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_pump_stops_when_receiver_gone() {
        let input = format!("{}\n{}\n", RADAR, RADAR);
        let (tx, rx) = mpsc::sync_channel(8);
        drop(rx);
        let stats = pump(
            Cursor::new(input),
            &tx,
            FeedOptions::default(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(stats.forwarded, 0);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_pump_stops_once_cancelled() {
        let input = format!("{}\n{}\n", RADAR, RADAR);
        let (tx, rx) = mpsc::sync_channel(8);
        let cancel = CancelToken::new();
        cancel.cancel();
        let stats = pump(
            Cursor::new(input),
            &tx,
            FeedOptions::default(),
            &cancel,
        )
        .unwrap();
        assert_eq!(stats.lines, 0);
        assert_eq!(rx.try_iter().count(), 0);
    }
}
