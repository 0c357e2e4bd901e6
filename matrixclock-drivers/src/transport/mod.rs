//! Bus transports for the controller chain

pub mod bitbang;
pub mod spi;

pub use bitbang::BitBangBus;
pub use spi::{SpiTransport, SpiTransportError};
