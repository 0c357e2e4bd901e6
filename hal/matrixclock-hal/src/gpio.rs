//! GPIO pin abstractions
//!
//! The LED-matrix bus only ever drives pins, so only the output side is
//! modelled here.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Writes are infallible; a chip HAL that can fail
/// should be wrapped by an adapter that decides what to do with the error.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}
