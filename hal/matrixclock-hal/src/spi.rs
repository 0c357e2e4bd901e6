//! SPI bus abstractions
//!
//! The display chain is write-only (MISO is never wired), so the trait
//! only exposes the transmit half of an SPI master.

/// SPI bus master, transmit only
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data, discarding anything clocked in
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until every queued byte has left the shift register
    ///
    /// Chip select / latch lines must not be released before this returns.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
