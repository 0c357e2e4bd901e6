//! Controller registers and queued commands
//!
//! Register addresses of the MAX7219-style matrix controller. Each chip
//! latches one `(register, data)` frame per transfer cycle.

/// Controller register address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// No operation; shifts through without effect
    Noop = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    /// BCD decode mode (0 = raw segments)
    DecodeMode = 0x09,
    /// Global brightness (0-15)
    Intensity = 0x0A,
    /// Number of scanned digit rows minus one
    ScanLimit = 0x0B,
    /// 0 = shutdown, 1 = normal operation
    Shutdown = 0x0C,
    /// 1 = all LEDs on
    DisplayTest = 0x0F,
}

impl Register {
    /// Digit register for column `index` (0-7) within a chip
    ///
    /// # Panics
    /// Panics if `index` is not in 0..8.
    pub const fn digit(index: usize) -> Self {
        match index {
            0 => Register::Digit0,
            1 => Register::Digit1,
            2 => Register::Digit2,
            3 => Register::Digit3,
            4 => Register::Digit4,
            5 => Register::Digit5,
            6 => Register::Digit6,
            7 => Register::Digit7,
            _ => panic!("digit index out of range"),
        }
    }

    /// Register address as sent on the wire
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        reg.addr()
    }
}

/// Maximum value of the intensity register
pub const MAX_BRIGHTNESS: u8 = 15;

/// Highest valid scan-limit value (all 8 rows)
pub const MAX_SCAN_LIMIT: u8 = 7;

/// One register write destined for a single chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub register: Register,
    pub data: u8,
}

impl Command {
    /// Frame sent to chips with nothing queued
    pub const NOOP: Command = Command::new(Register::Noop, 0);

    pub const fn new(register: Register, data: u8) -> Self {
        Self { register, data }
    }

    /// Write one column (digit register) of a chip
    pub const fn column(index: usize, data: u8) -> Self {
        Self::new(Register::digit(index), data)
    }

    /// Set global brightness, clamped to the register range
    pub const fn brightness(level: u8) -> Self {
        let level = if level > MAX_BRIGHTNESS {
            MAX_BRIGHTNESS
        } else {
            level
        };
        Self::new(Register::Intensity, level)
    }

    /// The two bytes shifted onto the bus for this command
    pub const fn frame(&self) -> [u8; 2] {
        [self.register.addr(), self.data]
    }
}

/// Number of commands in the per-chip start-up sequence without brightness
pub const STARTUP_BASE_LEN: usize = 12;

/// Longest per-chip start-up sequence (base plus optional brightness)
pub const STARTUP_MAX_LEN: usize = STARTUP_BASE_LEN + 1;

/// Build the per-chip start-up sequence
///
/// Raw segment mode, `scan_limit` rows, test mode off, leave shutdown,
/// blank all eight columns, then optionally set brightness.
pub fn startup_sequence(
    scan_limit: u8,
    brightness: Option<u8>,
) -> heapless::Vec<Command, STARTUP_MAX_LEN> {
    let mut seq = heapless::Vec::new();
    let scan_limit = scan_limit.min(MAX_SCAN_LIMIT);

    // Capacity covers every push below
    let _ = seq.push(Command::new(Register::DecodeMode, 0));
    let _ = seq.push(Command::new(Register::ScanLimit, scan_limit));
    let _ = seq.push(Command::new(Register::DisplayTest, 0));
    let _ = seq.push(Command::new(Register::Shutdown, 1));
    for col in 0..8 {
        let _ = seq.push(Command::column(col, 0));
    }
    if let Some(level) = brightness {
        let _ = seq.push(Command::brightness(level));
    }

    seq
}
