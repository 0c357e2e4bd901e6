//! Board-agnostic display core for cascaded 8x8 LED-matrix controllers
//!
//! This crate contains everything between "draw this string" and "shift
//! these bytes", independent of the pins or peripheral doing the shifting:
//!
//! - A linear column canvas with pixel, sprite, glyph and string rendering
//! - A shadow of the hardware state for minimal column diffs
//! - Bounded per-chip command queues
//! - The sync engine that serializes all chips in lock-step over one chain
//! - Start-up, brightness, power and test-mode commands
//! - A shared brightness cell for an asynchronous light sensor
//! - Static font tables and a built-in 5x7 font
//!
//! The serial chain itself is reached through [`traits::BusTransport`];
//! concrete transports live in `matrixclock-drivers`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod brightness;
pub mod canvas;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod queue;
pub mod sync;
pub mod text;
pub mod traits;

pub use brightness::{BrightnessTracker, SharedBrightness};
pub use canvas::Canvas;
pub use command::{Command, Register};
pub use config::{DisplayConfig, OverflowPolicy};
pub use display::MatrixDisplay;
pub use error::DisplayError;
pub use font::{Font, DEFAULT_FONT};
pub use queue::{CommandQueues, QueueError};
pub use text::measure_string;
pub use traits::{BusTransport, GlyphStore};
