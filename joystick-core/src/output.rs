//! Record sink trait and error types.

use core::future::Future;

/// Error type for record transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError {
    /// The link did not accept the bytes within the transmit timeout.
    Timeout,
    /// Transmitter reported a fault.
    Io,
}

/// Async sink for serialized records.
///
/// This trait abstracts the serial transmitter so the report loop can run
/// against real hardware or a host-side mock.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait RecordSink {
    /// Send one complete record.
    ///
    /// Must give up after a bounded time; a record that could not be sent is
    /// reported as an error and never retried by the caller.
    fn transmit(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), TransmitError>>;
}
