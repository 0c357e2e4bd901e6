//! Sync engine
//!
//! Turns canvas changes into queued register writes and shifts the queues
//! out over the shared serial chain.
//!
//! The chain is one long shift register: every latch pulse delivers exactly
//! one `(register, data)` frame to every chip. Bytes shifted first travel
//! furthest, so each cycle starts with the last chip in the chain and ends
//! with chip 0. Chips with nothing queued receive a no-op frame.

use crate::canvas::{Canvas, COLUMNS_PER_CHIP};
use crate::command::Command;
use crate::queue::{CommandQueues, QueueError};
use crate::traits::BusTransport;

/// Run one transfer cycle
///
/// Commands are consumed only after the frame has been committed, so a
/// transport error leaves every queue untouched.
pub fn transfer_cycle<B, const CHIPS: usize, const N: usize>(
    bus: &mut B,
    queues: &mut CommandQueues<CHIPS, N>,
) -> Result<(), B::Error>
where
    B: BusTransport,
{
    bus.begin()?;

    for chip in (0..CHIPS).rev() {
        let command = queues.peek(chip).copied().unwrap_or(Command::NOOP);
        let [register, data] = command.frame();
        bus.send(register)?;
        bus.send(data)?;
    }

    bus.commit()?;

    for chip in 0..CHIPS {
        queues.pop(chip);
    }

    Ok(())
}

/// Run transfer cycles until every queue is empty
///
/// Returns the number of cycles, which equals the deepest queue at entry.
pub fn drain_all<B, const CHIPS: usize, const N: usize>(
    bus: &mut B,
    queues: &mut CommandQueues<CHIPS, N>,
) -> Result<usize, B::Error>
where
    B: BusTransport,
{
    let mut cycles = 0;
    while queues.has_pending() {
        transfer_cycle(bus, queues)?;
        cycles += 1;
    }
    Ok(cycles)
}

/// Queue a write for every column where `canvas` differs from `shadow`
///
/// Each queued column is copied into `shadow` immediately. Returns the
/// number of changed columns. On error the failing column and everything
/// after it are left unreconciled.
pub fn reconcile<const CHIPS: usize, const N: usize>(
    canvas: &Canvas<CHIPS>,
    shadow: &mut Canvas<CHIPS>,
    queues: &mut CommandQueues<CHIPS, N>,
) -> Result<usize, QueueError> {
    let mut changed = 0;

    for chip in 0..CHIPS {
        for index in 0..COLUMNS_PER_CHIP {
            let col = chip * COLUMNS_PER_CHIP + index;
            let data = canvas.column(col);
            if data != shadow.column(col) {
                queues.push(chip, Command::column(index, data))?;
                shadow.set_column(col, data);
                changed += 1;
            }
        }
    }

    Ok(changed)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::command::Register;
    use crate::config::OverflowPolicy;
    use proptest::prelude::*;

    /// Bus event captured by [`RecordingBus`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BusEvent {
        Begin,
        Send(u8),
        Commit,
    }

    /// Transport that records every call
    #[derive(Debug, Default)]
    pub struct RecordingBus {
        pub events: Vec<BusEvent>,
        pub configured: bool,
        /// Fail the send with this index (counted across the whole run)
        pub fail_at_send: Option<usize>,
        pub sends: usize,
    }

    impl RecordingBus {
        /// Frames per committed cycle, as `(register, data)` pairs in
        /// send order
        pub fn cycles(&self) -> Vec<Vec<(u8, u8)>> {
            let mut cycles = Vec::new();
            let mut current = Vec::new();
            let mut pending = None;
            for event in &self.events {
                match *event {
                    BusEvent::Begin => {
                        current.clear();
                        pending = None;
                    }
                    BusEvent::Send(byte) => match pending.take() {
                        None => pending = Some(byte),
                        Some(reg) => current.push((reg, byte)),
                    },
                    BusEvent::Commit => cycles.push(core::mem::take(&mut current)),
                }
            }
            cycles
        }

        /// Non-noop frames addressed to `chip` of a `chips`-long chain
        pub fn commands_for(&self, chips: usize, chip: usize) -> Vec<(u8, u8)> {
            self.cycles()
                .iter()
                .map(|cycle| cycle[chips - 1 - chip])
                .filter(|&(reg, _)| reg != Register::Noop.addr())
                .collect()
        }
    }

    impl BusTransport for RecordingBus {
        type Error = &'static str;

        fn configure(&mut self) -> Result<(), Self::Error> {
            self.configured = true;
            Ok(())
        }

        fn begin(&mut self) -> Result<(), Self::Error> {
            self.events.push(BusEvent::Begin);
            Ok(())
        }

        fn send(&mut self, byte: u8) -> Result<(), Self::Error> {
            if self.fail_at_send == Some(self.sends) {
                return Err("bus fault");
            }
            self.sends += 1;
            self.events.push(BusEvent::Send(byte));
            Ok(())
        }

        fn commit(&mut self) -> Result<(), Self::Error> {
            self.events.push(BusEvent::Commit);
            Ok(())
        }
    }

    #[test]
    fn test_cycle_sends_noops_for_idle_chips() {
        let mut bus = RecordingBus::default();
        let mut queues = CommandQueues::<3, 4>::default();
        queues.push(1, Command::column(2, 0xAB)).unwrap();

        transfer_cycle(&mut bus, &mut queues).unwrap();

        assert_eq!(bus.events.first(), Some(&BusEvent::Begin));
        assert_eq!(bus.events.last(), Some(&BusEvent::Commit));
        assert_eq!(bus.cycles(), vec![vec![(0, 0), (3, 0xAB), (0, 0)]]);
        assert!(!queues.has_pending());
    }

    #[test]
    fn test_cycle_serves_farthest_chip_first() {
        let mut bus = RecordingBus::default();
        let mut queues = CommandQueues::<4, 4>::default();
        for chip in 0..4 {
            queues.push(chip, Command::column(0, chip as u8)).unwrap();
        }

        transfer_cycle(&mut bus, &mut queues).unwrap();

        let data: Vec<u8> = bus.cycles()[0].iter().map(|&(_, d)| d).collect();
        assert_eq!(data, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_drain_takes_deepest_queue_cycles() {
        let mut bus = RecordingBus::default();
        let mut queues = CommandQueues::<2, 8>::default();
        for i in 0..5 {
            queues.push(0, Command::column(i, 1)).unwrap();
        }
        queues.push(1, Command::column(0, 1)).unwrap();

        let cycles = drain_all(&mut bus, &mut queues).unwrap();
        assert_eq!(cycles, 5);
        assert_eq!(bus.cycles().len(), 5);
        assert_eq!(bus.commands_for(2, 0).len(), 5);
        assert_eq!(bus.commands_for(2, 1).len(), 1);
    }

    #[test]
    fn test_drain_empty_is_silent() {
        let mut bus = RecordingBus::default();
        let mut queues = CommandQueues::<2, 8>::default();
        assert_eq!(drain_all(&mut bus, &mut queues).unwrap(), 0);
        assert!(bus.events.is_empty());
    }

    #[test]
    fn test_failed_cycle_keeps_commands() {
        let mut bus = RecordingBus {
            fail_at_send: Some(1),
            ..Default::default()
        };
        let mut queues = CommandQueues::<2, 4>::default();
        queues.push(0, Command::column(0, 7)).unwrap();
        queues.push(1, Command::column(0, 8)).unwrap();

        assert_eq!(drain_all(&mut bus, &mut queues), Err("bus fault"));
        assert_eq!(queues.pending(0), 1);
        assert_eq!(queues.pending(1), 1);

        bus.fail_at_send = None;
        assert_eq!(drain_all(&mut bus, &mut queues), Ok(1));
        assert!(!queues.has_pending());
    }

    #[test]
    fn test_reconcile_addresses_chip_and_register() {
        let mut canvas = Canvas::<3>::new();
        let mut shadow = Canvas::<3>::new();
        let mut queues = CommandQueues::<3, 8>::default();

        canvas.set_column(0, 0x01);
        canvas.set_column(13, 0x80);
        canvas.set_column(23, 0xFF);

        assert_eq!(reconcile(&canvas, &mut shadow, &mut queues), Ok(3));
        assert_eq!(shadow, canvas);
        assert_eq!(queues.pop(0), Some(Command::column(0, 0x01)));
        assert_eq!(queues.pop(1), Some(Command::new(Register::Digit5, 0x80)));
        assert_eq!(queues.pop(2), Some(Command::new(Register::Digit7, 0xFF)));
        assert!(!queues.has_pending());

        // Nothing left to do
        assert_eq!(reconcile(&canvas, &mut shadow, &mut queues), Ok(0));
    }

    #[test]
    fn test_reconcile_stops_on_full_queue() {
        let mut canvas = Canvas::<1>::new();
        let mut shadow = Canvas::<1>::new();
        let mut queues = CommandQueues::<1, 2>::new(OverflowPolicy::Reject);
        for col in 0..4 {
            canvas.set_column(col, 0xFF);
        }

        assert_eq!(
            reconcile(&canvas, &mut shadow, &mut queues),
            Err(QueueError::Full { chip: 0 })
        );
        assert_eq!(shadow.column(1), 0xFF);
        assert_eq!(shadow.column(2), 0x00);
    }

    proptest! {
        #[test]
        fn prop_drain_cycles_equal_max_depth(
            depths in proptest::collection::vec(0usize..=8, 4)
        ) {
            let mut bus = RecordingBus::default();
            let mut queues = CommandQueues::<4, 8>::default();
            for (chip, &depth) in depths.iter().enumerate() {
                for i in 0..depth {
                    queues.push(chip, Command::column(i, i as u8)).unwrap();
                }
            }

            let cycles = drain_all(&mut bus, &mut queues).unwrap();
            prop_assert_eq!(cycles, *depths.iter().max().unwrap());
            for cycle in bus.cycles() {
                prop_assert_eq!(cycle.len(), 4);
            }
            for (chip, &depth) in depths.iter().enumerate() {
                prop_assert_eq!(bus.commands_for(4, chip).len(), depth);
            }
        }
    }
}
