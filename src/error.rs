//! Unified error type for ps2ble.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for
//! efficient on-target logging.

use core::fmt;

/// Top-level error type returned by the report engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The transport failed to deliver or publish something.
    Transport(TransportError),

    /// A static report map disagrees with its Report Reference descriptor.
    /// Fatal to device bring-up.
    InvalidDescriptor,

    /// The function-key binding table has no free slot.
    BindingTableFull,
}

/// Failures reported by a [`Transport`](crate::transport::Transport)
/// implementation. Retry policy, if any, belongs to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Raw status code from the platform GATT stack.
    Raw(u32),
    /// A characteristic value notification failed.
    NotifyFailed,
    /// Advertising could not be started or stopped.
    AdvertisingFailed,
    /// The link dropped while a request was in flight.
    Disconnected,
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::InvalidDescriptor => f.write_str("report map does not match its report reference"),
            Error::BindingTableFull => f.write_str("function-key binding table is full"),
        }
    }
}
