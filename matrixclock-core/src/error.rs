//! Display error type

use crate::queue::QueueError;

/// Errors that can occur while pushing state to the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The bus transport failed; queued commands were kept
    Bus(E),
    /// A command could not be queued
    Queue(QueueError),
}

impl<E> From<QueueError> for DisplayError<E> {
    fn from(err: QueueError) -> Self {
        DisplayError::Queue(err)
    }
}
