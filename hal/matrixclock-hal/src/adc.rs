//! ADC channel abstraction

/// Full-scale value of a 12-bit conversion
pub const ADC_MAX_12BIT: u16 = 4095;

/// A single ADC channel
///
/// Readings are right-aligned 12-bit values (0-4095).
pub trait AdcReader {
    /// Error type for a failed conversion
    type Error;

    /// Perform one blocking conversion
    fn read(&mut self) -> Result<u16, Self::Error>;
}
