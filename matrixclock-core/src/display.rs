//! LED-matrix display
//!
//! [`MatrixDisplay`] owns the working canvas, the shadow of what the chips
//! currently show, the per-chip command queues and the bus transport.
//! Renderers draw into [`canvas_mut`](MatrixDisplay::canvas_mut);
//! [`update`](MatrixDisplay::update) pushes the difference to hardware.
//!
//! Every operation that talks to the bus blocks until all queues are
//! drained.

use crate::canvas::Canvas;
use crate::command::{startup_sequence, Command, Register, STARTUP_MAX_LEN};
use crate::config::{DisplayConfig, DEFAULT_CHIPS, DEFAULT_QUEUE_LEN};
use crate::error::DisplayError;
use crate::queue::CommandQueues;
use crate::sync;
use crate::traits::BusTransport;

/// Cascaded LED-matrix display of `CHIPS` 8x8 segments
///
/// `QUEUE` is the per-chip command capacity; it must hold the whole
/// start-up sequence, which is checked at compile time.
pub struct MatrixDisplay<
    B,
    const CHIPS: usize = { DEFAULT_CHIPS },
    const QUEUE: usize = { DEFAULT_QUEUE_LEN },
> {
    bus: B,
    config: DisplayConfig,
    canvas: Canvas<CHIPS>,
    shadow: Canvas<CHIPS>,
    queues: CommandQueues<CHIPS, QUEUE>,
}

impl<B, const CHIPS: usize, const QUEUE: usize> MatrixDisplay<B, CHIPS, QUEUE>
where
    B: BusTransport,
{
    const QUEUE_FITS_STARTUP: () = assert!(
        QUEUE >= STARTUP_MAX_LEN,
        "command queue too small for the start-up sequence"
    );
    const HAS_CHIPS: () = assert!(CHIPS > 0, "display needs at least one chip");

    /// Create a display with the default configuration
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, DisplayConfig::default())
    }

    /// Create a display
    ///
    /// Nothing is sent until [`init`](Self::init) is called.
    pub fn with_config(bus: B, config: DisplayConfig) -> Self {
        let () = Self::QUEUE_FITS_STARTUP;
        let () = Self::HAS_CHIPS;

        Self {
            bus,
            config,
            canvas: Canvas::new(),
            shadow: Canvas::new(),
            queues: CommandQueues::new(config.overflow),
        }
    }

    /// Bring every chip out of reset
    ///
    /// Configures the bus lines, queues the start-up sequence for every
    /// chip and drains it. Must complete before anything is rendered.
    /// Canvas and shadow are blanked to match the cleared registers.
    pub fn init(&mut self) -> Result<(), DisplayError<B::Error>> {
        info!("Initializing {} matrix chips", CHIPS);

        self.bus.configure().map_err(DisplayError::Bus)?;

        // Leftovers from before a reset would desynchronize the sequence
        self.queues.clear();

        let sequence = startup_sequence(self.config.scan_limit, self.config.initial_brightness);
        for chip in 0..CHIPS {
            for &command in sequence.iter() {
                self.queues.push(chip, command)?;
            }
        }

        self.canvas.clear();
        self.shadow.clear();

        let cycles = self.drain_all()?;
        info!("Matrix initialized in {} cycles", cycles);
        Ok(())
    }

    /// Set the global brightness of every chip (0-15, clamped)
    pub fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError<B::Error>> {
        debug!("Brightness -> {}", level);
        self.broadcast(Command::brightness(level))
    }

    /// Turn every LED on (`true`) or return to normal operation
    pub fn set_test_mode(&mut self, enabled: bool) -> Result<(), DisplayError<B::Error>> {
        self.broadcast(Command::new(Register::DisplayTest, enabled as u8))
    }

    /// Leave (`true`) or enter (`false`) shutdown; register contents survive
    pub fn set_power(&mut self, on: bool) -> Result<(), DisplayError<B::Error>> {
        self.broadcast(Command::new(Register::Shutdown, on as u8))
    }

    /// Queue `command` for every chip and drain
    fn broadcast(&mut self, command: Command) -> Result<(), DisplayError<B::Error>> {
        self.flush_leftovers()?;
        self.queues.broadcast(command)?;
        self.drain_all()?;
        Ok(())
    }

    /// Drain commands left behind by an earlier failed transfer
    ///
    /// New work must start from empty queues, otherwise it can overflow
    /// behind the leftovers and never reach the bus.
    fn flush_leftovers(&mut self) -> Result<(), DisplayError<B::Error>> {
        if self.queues.has_pending() {
            debug!("Draining {} leftover cycles", self.queues.max_pending());
            self.drain_all()?;
        }
        Ok(())
    }

    /// Flush the canvas to hardware
    ///
    /// Queues every changed column and drains. Returns the number of
    /// columns written; a second call without drawing returns 0.
    pub fn update(&mut self) -> Result<usize, DisplayError<B::Error>> {
        self.flush_leftovers()?;
        let changed = self.reconcile()?;
        if changed > 0 {
            trace!("Updating {} columns", changed);
        }
        self.drain_all()?;
        Ok(changed)
    }

    /// Queue writes for every column that differs from the shadow
    pub fn reconcile(&mut self) -> Result<usize, DisplayError<B::Error>> {
        Ok(sync::reconcile(
            &self.canvas,
            &mut self.shadow,
            &mut self.queues,
        )?)
    }

    /// Queue a raw command for one chip
    pub fn push(&mut self, chip: usize, command: Command) -> Result<(), DisplayError<B::Error>> {
        Ok(self.queues.push(chip, command)?)
    }

    /// True if any chip has commands waiting
    pub fn has_pending(&self) -> bool {
        self.queues.has_pending()
    }

    /// Send one frame to every chip
    pub fn transfer_cycle(&mut self) -> Result<(), DisplayError<B::Error>> {
        sync::transfer_cycle(&mut self.bus, &mut self.queues).map_err(|e| {
            warn!("Matrix bus transfer failed");
            DisplayError::Bus(e)
        })
    }

    /// Send frames until every queue is empty, returning the cycle count
    pub fn drain_all(&mut self) -> Result<usize, DisplayError<B::Error>> {
        sync::drain_all(&mut self.bus, &mut self.queues).map_err(|e| {
            warn!("Matrix bus transfer failed");
            DisplayError::Bus(e)
        })
    }

    /// Working canvas
    pub fn canvas(&self) -> &Canvas<CHIPS> {
        &self.canvas
    }

    /// Working canvas, for drawing
    pub fn canvas_mut(&mut self) -> &mut Canvas<CHIPS> {
        &mut self.canvas
    }

    /// Last state written to the chips
    pub fn shadow(&self) -> &Canvas<CHIPS> {
        &self.shadow
    }

    /// Command queues
    pub fn queues(&self) -> &CommandQueues<CHIPS, QUEUE> {
        &self.queues
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Bus transport
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Bus transport, mutably
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus transport
    pub fn release(self) -> B {
        self.bus
    }
}
