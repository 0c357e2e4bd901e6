//! Display configuration definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::command::MAX_SCAN_LIMIT;

/// Default number of chained chips
pub const DEFAULT_CHIPS: usize = 4;

/// Default per-chip command queue capacity
pub const DEFAULT_QUEUE_LEN: usize = 16;

/// What a full command queue does with a new command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Refuse the new command with `QueueError::Full`
    #[default]
    Reject,
    /// Drop the oldest unread command to make room
    OverwriteOldest,
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Command queue overflow behaviour
    pub overflow: OverflowPolicy,
    /// Scan-limit register value (7 = all 8 rows)
    pub scan_limit: u8,
    /// Brightness appended to the start-up sequence, if any
    pub initial_brightness: Option<u8>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::Reject,
            scan_limit: MAX_SCAN_LIMIT,
            initial_brightness: None,
        }
    }
}

impl DisplayConfig {
    /// Set the overflow policy
    pub const fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the start-up brightness
    pub const fn with_initial_brightness(mut self, level: u8) -> Self {
        self.initial_brightness = Some(level);
        self
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize from postcard bytes
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
