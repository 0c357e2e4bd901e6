//! `embedded-hal` 1.0 adapters
//!
//! Wrap any `embedded-hal` output pin or SPI bus so it can drive the
//! matrix transports. Chip HALs (embassy, rp-hal, stm32 HALs) all
//! implement these traits.

use embedded_hal::digital::OutputPin as EhOutput;
use embedded_hal::spi::SpiBus as EhSpi;

use matrixclock_hal::{OutputPin, SpiBus};

/// Output pin adapter
///
/// Pin errors are discarded; on-chip GPIO writes do not fail in practice.
pub struct EhOutputPin<P>(pub P);

impl<P: EhOutput> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}

/// SPI bus adapter
pub struct EhSpiBus<S>(pub S);

impl<S: EhSpi<u8>> SpiBus for EhSpiBus<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        EhSpi::write(&mut self.0, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        EhSpi::flush(&mut self.0)
    }
}
