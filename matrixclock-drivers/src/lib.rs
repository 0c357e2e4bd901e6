//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in matrixclock-core on top of matrixclock-hal:
//!
//! - Bus transports for the controller chain (bit-banged pins, SPI + latch)
//! - Adapters from `embedded-hal` 1.0 pins and SPI buses
//! - Light sensor feeding the shared brightness level

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod compat;
pub mod sensor;
pub mod transport;

pub use compat::{EhOutputPin, EhSpiBus};
pub use sensor::light::LightSensor;
pub use transport::{BitBangBus, SpiTransport, SpiTransportError};
