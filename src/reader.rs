//! Serial MRZ reader output handling.
//!
//! Desktop MRZ readers wrap each scan in guard characters (typically a
//! start-of-text pair before the zone and an end-of-text pair after it) and
//! separate lines with a bare carriage return. [`strip_frame`] turns that raw
//! transmission into a block the parser accepts. It is a convenience for
//! acquisition code and never runs inside [`crate::parse`].

use crate::constants::{DEFAULT_FRAME_LEADER_LEN, DEFAULT_FRAME_TRAILER_LEN};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of guard characters a reader puts around each transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Characters to drop from the start
    pub leader_len: usize,

    /// Characters to drop from the end
    pub trailer_len: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            leader_len: DEFAULT_FRAME_LEADER_LEN,
            trailer_len: DEFAULT_FRAME_TRAILER_LEN,
        }
    }
}

impl FrameConfig {
    /// Frame with no guard characters
    pub fn none() -> Self {
        Self {
            leader_len: 0,
            trailer_len: 0,
        }
    }

    pub fn with_leader_len(mut self, leader_len: usize) -> Self {
        self.leader_len = leader_len;
        self
    }

    pub fn with_trailer_len(mut self, trailer_len: usize) -> Self {
        self.trailer_len = trailer_len;
        self
    }
}

/// Remove the guard characters, trim, and turn every `\r` into `\n`.
///
/// Counts are in characters. A transmission shorter than the frame itself
/// yields an empty string, which the parser reports as empty input.
pub fn strip_frame(raw: &str, frame: FrameConfig) -> String {
    let total = raw.chars().count();
    let framing = frame.leader_len + frame.trailer_len;
    if total < framing {
        warn!(
            "Reader transmission of {} character(s) is shorter than its {}-character frame",
            total, framing
        );
        return String::new();
    }

    let inner: String = raw
        .chars()
        .skip(frame.leader_len)
        .take(total - framing)
        .collect();
    let stripped = inner.trim().replace("\r\n", "\n").replace('\r', "\n");

    debug!(
        "Stripped reader frame: {} -> {} character(s)",
        total,
        stripped.chars().count()
    );
    stripped
}
