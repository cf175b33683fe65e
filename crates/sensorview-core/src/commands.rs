//! Viewer commands sent alongside sensor messages.
//!
//! Commands are queued and applied at the next tick boundary,
//! before that tick's messages are normalized.

use serde::{Deserialize, Serialize};

use crate::enums::ColorMode;

/// All possible viewer actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewerCommand {
    // --- Display ---
    /// Set how drawn objects are colored.
    SetColorMode { mode: ColorMode },
    /// Advance to the next color mode.
    CycleColorMode,

    // --- Message intake ---
    /// Freeze or unfreeze the display. While frozen, sensor messages are discarded.
    SetFreezeFrame { enabled: bool },
    /// Flip the freeze-frame state.
    ToggleFreezeFrame,

    // --- Store ---
    /// Release every entity immediately.
    ClearAll,
}
