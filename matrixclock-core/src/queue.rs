//! Per-chip command queues
//!
//! Every chip in the chain owns a bounded ring of pending register writes.
//! The sync engine takes at most one command from each ring per transfer
//! cycle, so chips progress in lock-step.

use heapless::Deque;

use crate::command::Command;
use crate::config::OverflowPolicy;

/// Errors that can occur when queueing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Chip index is not part of the chain
    InvalidChip { chip: usize },
    /// Chip's queue is full and the policy is `Reject`
    Full { chip: usize },
}

/// Bounded command rings, one per chip
///
/// `N` is the per-chip capacity. It must exceed the largest burst queued
/// for one chip between two drains, or commands are rejected or dropped
/// according to the [`OverflowPolicy`].
pub struct CommandQueues<const CHIPS: usize, const N: usize> {
    queues: [Deque<Command, N>; CHIPS],
    policy: OverflowPolicy,
    /// Commands discarded by `OverwriteOldest`
    dropped: u32,
}

impl<const CHIPS: usize, const N: usize> Default for CommandQueues<CHIPS, N> {
    fn default() -> Self {
        Self::new(OverflowPolicy::default())
    }
}

impl<const CHIPS: usize, const N: usize> CommandQueues<CHIPS, N> {
    /// Create empty queues
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            queues: core::array::from_fn(|_| Deque::new()),
            policy,
            dropped: 0,
        }
    }

    /// Overflow policy in effect
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Change the overflow policy
    pub fn set_policy(&mut self, policy: OverflowPolicy) {
        self.policy = policy;
    }

    /// Append a command to `chip`'s queue
    pub fn push(&mut self, chip: usize, command: Command) -> Result<(), QueueError> {
        let policy = self.policy;
        let queue = self
            .queues
            .get_mut(chip)
            .ok_or(QueueError::InvalidChip { chip })?;

        if queue.is_full() {
            match policy {
                OverflowPolicy::Reject => return Err(QueueError::Full { chip }),
                OverflowPolicy::OverwriteOldest => {
                    queue.pop_front();
                    self.dropped = self.dropped.saturating_add(1);
                    warn!("Command queue {} full, dropped oldest", chip);
                }
            }
        }

        queue
            .push_back(command)
            .map_err(|_| QueueError::Full { chip })
    }

    /// Append the same command to every chip's queue
    pub fn broadcast(&mut self, command: Command) -> Result<(), QueueError> {
        for chip in 0..CHIPS {
            self.push(chip, command)?;
        }
        Ok(())
    }

    /// Next command for `chip` without consuming it
    pub fn peek(&self, chip: usize) -> Option<&Command> {
        self.queues.get(chip).and_then(|q| q.front())
    }

    /// Consume the next command for `chip`
    pub fn pop(&mut self, chip: usize) -> Option<Command> {
        self.queues.get_mut(chip).and_then(|q| q.pop_front())
    }

    /// True if any chip has unread commands
    pub fn has_pending(&self) -> bool {
        self.queues.iter().any(|q| !q.is_empty())
    }

    /// Number of unread commands for `chip`
    pub fn pending(&self, chip: usize) -> usize {
        self.queues.get(chip).map_or(0, |q| q.len())
    }

    /// Deepest queue in the chain
    ///
    /// Draining takes exactly this many transfer cycles.
    pub fn max_pending(&self) -> usize {
        self.queues.iter().map(|q| q.len()).max().unwrap_or(0)
    }

    /// Number of commands discarded on overflow so far
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard every pending command
    pub fn clear(&mut self) {
        for queue in self.queues.iter_mut() {
            queue.clear();
        }
    }

    /// Per-chip capacity
    pub const fn capacity(&self) -> usize {
        N
    }
}
