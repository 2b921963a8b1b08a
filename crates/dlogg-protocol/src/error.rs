//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while decoding D-LOGG protocol frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is too short to be valid.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Trailing checksum byte disagrees with the computed sum.
    #[error("checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch {
        /// Checksum computed over the payload.
        expected: u8,
        /// Checksum byte carried by the frame.
        actual: u8,
    },

    /// A marker or echo byte does not match the protocol expectation.
    #[error("unexpected response byte: expected 0x{expected:02X}, got 0x{actual:02X}")]
    UnexpectedResponse {
        /// Byte required by the protocol.
        expected: u8,
        /// Byte actually received.
        actual: u8,
    },

    /// Logging criterion byte outside both valid ranges.
    #[error("invalid logging criterion byte: 0x{0:02X}")]
    InvalidLoggingCriterion(u8),

    /// Input channel carries an unrecognized signal type tag.
    #[error("unknown input signal type: {0}")]
    UnknownSignalType(u8),

    /// Module reported a mode byte this driver does not know.
    #[error("unknown device mode: 0x{0:02X}")]
    UnknownMode(u8),

    /// Module reported a type byte this driver does not know.
    #[error("unknown device type: 0x{0:02X}")]
    UnknownDeviceType(u8),
}
