//! SPI chain transport
//!
//! Uses a hardware SPI master for DIN/CLK and a GPIO for LOAD. The frame
//! for the whole chain is collected during a cycle and written in a single
//! burst on commit, so per-byte SPI overhead is paid once per cycle.

use heapless::Vec;

use matrixclock_core::traits::BusTransport;
use matrixclock_hal::{OutputPin, SpiBus};

/// Errors that can occur with the SPI transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiTransportError<E> {
    /// SPI peripheral error
    Spi(E),
    /// More bytes were sent in one cycle than `FRAME` holds
    FrameOverflow,
}

/// Chain transport over an SPI master and a latch pin
///
/// `FRAME` must be at least two bytes per chip in the chain.
pub struct SpiTransport<SPI, LOAD, const FRAME: usize> {
    spi: SPI,
    load: LOAD,
    frame: Vec<u8, FRAME>,
}

impl<SPI, LOAD, const FRAME: usize> SpiTransport<SPI, LOAD, FRAME>
where
    SPI: SpiBus,
    LOAD: OutputPin,
{
    /// Create a transport
    ///
    /// The SPI bus should run in mode 0 at no more than 10 MHz.
    pub fn new(spi: SPI, load: LOAD) -> Self {
        Self {
            spi,
            load,
            frame: Vec::new(),
        }
    }

    /// Give back the SPI bus and latch pin
    pub fn release(self) -> (SPI, LOAD) {
        (self.spi, self.load)
    }
}

impl<SPI, LOAD, const FRAME: usize> BusTransport for SpiTransport<SPI, LOAD, FRAME>
where
    SPI: SpiBus,
    LOAD: OutputPin,
{
    type Error = SpiTransportError<SPI::Error>;

    fn configure(&mut self) -> Result<(), Self::Error> {
        self.load.set_high();
        Ok(())
    }

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.frame.clear();
        Ok(())
    }

    fn send(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.frame
            .push(byte)
            .map_err(|_| SpiTransportError::FrameOverflow)
    }

    /// Write the collected frame and latch it
    ///
    /// If the write fails, an all-NOOP frame of the same length is shifted
    /// in before LOAD rises, so a partly shifted frame is pushed out of the
    /// chain instead of being latched into the registers.
    fn commit(&mut self) -> Result<(), Self::Error> {
        self.load.set_low();
        let result = self
            .spi
            .write(&self.frame)
            .and_then(|()| self.spi.flush())
            .map_err(SpiTransportError::Spi);
        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI frame write failed, latching no-ops");
            self.frame.iter_mut().for_each(|byte| *byte = 0);
            let _ = self.spi.write(&self.frame).and_then(|()| self.spi.flush());
        }
        self.load.set_high();
        self.frame.clear();
        result
    }
}
