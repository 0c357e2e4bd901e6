//! Shared brightness value
//!
//! The light sensor runs on its own cadence (often from an interrupt) and
//! publishes a level; the display loop picks it up and forwards it to the
//! chips. The level is a single byte so an atomic is enough to share it.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::command::MAX_BRIGHTNESS;
use crate::error::DisplayError;
use crate::display::MatrixDisplay;
use crate::traits::BusTransport;

/// Brightness level shared between the sensor and the display loop
///
/// Suitable for a `static`:
///
/// ```
/// use matrixclock_core::brightness::SharedBrightness;
///
/// static BRIGHTNESS: SharedBrightness = SharedBrightness::new(8);
/// BRIGHTNESS.store(3);
/// assert_eq!(BRIGHTNESS.load(), 3);
/// ```
#[derive(Debug)]
pub struct SharedBrightness {
    level: AtomicU8,
}

impl Default for SharedBrightness {
    fn default() -> Self {
        Self::new(MAX_BRIGHTNESS)
    }
}

impl SharedBrightness {
    /// Create a cell holding `level` (clamped to 0-15)
    pub const fn new(level: u8) -> Self {
        let level = if level > MAX_BRIGHTNESS {
            MAX_BRIGHTNESS
        } else {
            level
        };
        Self {
            level: AtomicU8::new(level),
        }
    }

    /// Publish a new level (clamped to 0-15)
    pub fn store(&self, level: u8) {
        self.level.store(level.min(MAX_BRIGHTNESS), Ordering::Relaxed);
    }

    /// Latest published level
    pub fn load(&self) -> u8 {
        self.level.load(Ordering::Relaxed)
    }
}

/// Forwards brightness changes to the display
///
/// Remembers the last level written so that polling an unchanged value
/// costs no bus traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrightnessTracker {
    applied: Option<u8>,
}

impl BrightnessTracker {
    pub const fn new() -> Self {
        Self { applied: None }
    }

    /// Level last written to the chips
    pub fn applied(&self) -> Option<u8> {
        self.applied
    }

    /// Apply `shared`'s level if it changed since the last call
    ///
    /// Returns `true` if a brightness command was sent.
    pub fn poll<B, const CHIPS: usize, const QUEUE: usize>(
        &mut self,
        shared: &SharedBrightness,
        display: &mut MatrixDisplay<B, CHIPS, QUEUE>,
    ) -> Result<bool, DisplayError<B::Error>>
    where
        B: BusTransport,
    {
        let level = shared.load();
        if self.applied == Some(level) {
            return Ok(false);
        }

        display.set_brightness(level)?;
        self.applied = Some(level);
        Ok(true)
    }

    /// Forget the applied level, forcing the next poll to write
    ///
    /// Call after re-initializing the display.
    pub fn invalidate(&mut self) {
        self.applied = None;
    }
}
