//! MatrixClock Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the display stack
//! needs from a chip HAL. Implementations live in chip-specific crates or
//! are adapted from `embedded-hal` by `matrixclock-drivers`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (scheduling, clock, strings)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  matrixclock-core (canvas, sync engine) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  matrixclock-drivers (bus transports)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  matrixclock-hal (this crate - traits)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (bus DIN/CLK/LOAD lines)
//! - [`spi::SpiBus`] - Write-only SPI master
//! - [`adc::AdcReader`] - Single ADC channel (light sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use adc::AdcReader;
pub use gpio::OutputPin;
pub use spi::SpiBus;
