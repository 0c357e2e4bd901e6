//! Bit-banged chain transport
//!
//! Drives the chain with three GPIO outputs: data (DIN), clock (CLK) and
//! latch (LOAD/CS). Data is sampled on the rising clock edge, most
//! significant bit first; the rising LOAD edge latches every chip.

use core::convert::Infallible;

use matrixclock_core::traits::BusTransport;
use matrixclock_hal::OutputPin;

/// Chain transport over three output pins
pub struct BitBangBus<DIN, CLK, LOAD> {
    din: DIN,
    clk: CLK,
    load: LOAD,
}

impl<DIN, CLK, LOAD> BitBangBus<DIN, CLK, LOAD>
where
    DIN: OutputPin,
    CLK: OutputPin,
    LOAD: OutputPin,
{
    /// Create a transport
    ///
    /// The pins must already be configured as push-pull outputs.
    pub fn new(din: DIN, clk: CLK, load: LOAD) -> Self {
        Self { din, clk, load }
    }

    /// Give back the pins
    pub fn release(self) -> (DIN, CLK, LOAD) {
        (self.din, self.clk, self.load)
    }
}

impl<DIN, CLK, LOAD> BusTransport for BitBangBus<DIN, CLK, LOAD>
where
    DIN: OutputPin,
    CLK: OutputPin,
    LOAD: OutputPin,
{
    type Error = Infallible;

    fn configure(&mut self) -> Result<(), Self::Error> {
        // Idle: latch high, clock low
        self.load.set_high();
        self.clk.set_low();
        self.din.set_low();
        Ok(())
    }

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.load.set_low();
        Ok(())
    }

    fn send(&mut self, byte: u8) -> Result<(), Self::Error> {
        for bit in (0..8).rev() {
            self.din.set_state(byte & (1 << bit) != 0);
            self.clk.set_high();
            self.clk.set_low();
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.load.set_high();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use matrixclock_core::{Command, MatrixDisplay};
    use proptest::prelude::*;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Din,
        Clk,
        Load,
    }

    type Log = Rc<RefCell<Vec<(Line, bool)>>>;

    /// Pin that appends every write to a shared log
    struct MockPin {
        line: Line,
        log: Log,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.log.borrow_mut().push((self.line, true));
        }

        fn set_low(&mut self) {
            self.log.borrow_mut().push((self.line, false));
        }
    }

    fn bus() -> (BitBangBus<MockPin, MockPin, MockPin>, Log) {
        let log: Log = Rc::default();
        let pin = |line| MockPin {
            line,
            log: log.clone(),
        };
        let bus = BitBangBus::new(pin(Line::Din), pin(Line::Clk), pin(Line::Load));
        (bus, log)
    }

    /// Bytes clocked in on rising CLK edges, grouped per latch pulse
    fn decode(log: &[(Line, bool)]) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut bits = Vec::new();
        let mut din = false;
        for &(line, high) in log {
            match (line, high) {
                (Line::Din, level) => din = level,
                (Line::Clk, true) => bits.push(din),
                (Line::Load, false) => bits.clear(),
                (Line::Load, true) => {
                    let bytes = bits
                        .chunks(8)
                        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
                        .collect();
                    frames.push(bytes);
                    bits.clear();
                }
                _ => {}
            }
        }
        frames
    }

    #[test]
    fn test_configure_idles_lines() {
        let (mut bus, log) = bus();
        bus.configure().unwrap();
        assert_eq!(
            *log.borrow(),
            vec![(Line::Load, true), (Line::Clk, false), (Line::Din, false)]
        );
    }

    #[test]
    fn test_send_msb_first() {
        let (mut bus, log) = bus();
        bus.send(0b1010_0001).unwrap();

        let log = log.borrow();
        let rising = log.iter().filter(|&&e| e == (Line::Clk, true)).count();
        assert_eq!(rising, 8);

        let data: Vec<bool> = log
            .iter()
            .filter(|(line, _)| *line == Line::Din)
            .map(|&(_, high)| high)
            .collect();
        assert_eq!(
            data,
            vec![true, false, true, false, false, false, false, true]
        );
        // Clock always ends low
        assert_eq!(log.last(), Some(&(Line::Clk, false)));
    }

    #[test]
    fn test_frame_latched_on_commit() {
        let (mut bus, log) = bus();
        bus.begin().unwrap();
        bus.send(0x0A).unwrap();
        bus.send(0x07).unwrap();
        assert!(decode(&log.borrow()).is_empty());
        bus.commit().unwrap();
        assert_eq!(decode(&log.borrow()), vec![vec![0x0A, 0x07]]);
    }

    #[test]
    fn test_display_over_pins() {
        let (bus, log) = bus();
        let mut display = MatrixDisplay::<_, 2, 16>::new(bus);
        display.init().unwrap();
        log.borrow_mut().clear();

        display.push(0, Command::brightness(3)).unwrap();
        display.drain_all().unwrap();

        // Chip 1 (far end) gets a no-op, chip 0 the brightness write
        assert_eq!(decode(&log.borrow()), vec![vec![0x00, 0x00, 0x0A, 0x03]]);
    }

    proptest! {
        #[test]
        fn prop_frames_shift_out_intact(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
            let (mut bus, log) = bus();
            bus.begin().unwrap();
            for &byte in &bytes {
                bus.send(byte).unwrap();
            }
            bus.commit().unwrap();
            prop_assert_eq!(decode(&log.borrow()), vec![bytes]);
        }
    }
}
