//! Configuration types
//!
//! Board-agnostic display configuration, optionally stored as postcard
//! binary data.

pub mod types;

pub use types::*;
