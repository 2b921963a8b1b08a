//! Transceiver error types.

use dlogg_protocol::{Mode, ProtocolError};
use thiserror::Error;

/// Errors that can occur while exchanging commands with a module.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The byte channel failed.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response failed to decode.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Fewer bytes than expected arrived before the read timeout. The read
    /// is not retried; the call is terminal.
    #[error("received {actual} bytes instead of {expected}")]
    ShortRead {
        /// Bytes the command expects.
        expected: usize,
        /// Bytes that actually arrived.
        actual: usize,
    },

    /// The connected module reports a mode this driver does not implement.
    #[error("unsupported device mode: {0}")]
    UnsupportedMode(Mode),
}

/// Connect failure that hands the byte channel back to the caller.
///
/// Opening a [`DLoggDevice`](crate::DLoggDevice) consumes the channel; when
/// the connect handshake fails the caller still owns the cleanup, so the
/// channel rides along with the error.
pub struct OpenError<C> {
    /// Why the connect failed.
    pub error: DeviceError,
    /// The channel, returned for explicit shutdown.
    pub channel: C,
}

impl<C> OpenError<C> {
    /// Drop the channel and keep only the failure.
    pub fn into_error(self) -> DeviceError {
        self.error
    }
}

impl<C> std::fmt::Debug for OpenError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<C> std::fmt::Display for OpenError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl<C> std::error::Error for OpenError<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<C> From<OpenError<C>> for DeviceError {
    fn from(error: OpenError<C>) -> Self {
        error.error
    }
}
