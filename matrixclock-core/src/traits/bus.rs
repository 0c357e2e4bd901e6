//! Serial chain transport trait

/// Transport for a chain of cascaded matrix controllers
///
/// The controllers form one long shift register. A transfer cycle opens the
/// chain with [`begin`](Self::begin), shifts two bytes (register, data) per
/// chip starting with the chip furthest from the microcontroller, and
/// latches every chip at once with [`commit`](Self::commit).
///
/// The sync engine calls `begin` once per cycle, `send` exactly
/// `2 * chips` times and `commit` once.
pub trait BusTransport {
    /// Error type for transport failures
    type Error;

    /// Prepare the bus lines (direction, idle levels)
    ///
    /// Called once from display initialization before any frame is sent.
    fn configure(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Start a transfer cycle
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Shift one byte into the chain, most significant bit first
    fn send(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Latch the shifted frame into every chip
    fn commit(&mut self) -> Result<(), Self::Error>;
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    type Error = T::Error;

    fn configure(&mut self) -> Result<(), Self::Error> {
        (**self).configure()
    }

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn send(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send(byte)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        (**self).commit()
    }
}
