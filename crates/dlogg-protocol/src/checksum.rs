//! Additive modulo-256 checksums.
//!
//! Several frames carry a trailing checksum byte: the sum of all preceding
//! bytes truncated to 8 bits.

use crate::error::ProtocolError;

/// Compute the checksum over a payload.
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

/// Append the checksum byte to a frame under construction.
pub fn append_checksum(frame: &mut Vec<u8>) {
    frame.push(checksum(frame));
}

/// Validate a frame ending in a checksum byte.
///
/// Returns the payload without the checksum byte, or
/// [`ProtocolError::ChecksumMismatch`] if the trailing byte disagrees with
/// the computed sum.
pub fn validate(frame: &[u8]) -> Result<&[u8], ProtocolError> {
    let Some((received, payload)) = frame.split_last() else {
        return Err(ProtocolError::FrameTooShort {
            expected: 1,
            actual: 0,
        });
    };
    let computed = checksum(payload);
    if *received != computed {
        return Err(ProtocolError::ChecksumMismatch {
            expected: computed,
            actual: *received,
        });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_wraps_at_256() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x01, 0x02, 0x03]), 0x06);
        assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
    }

    #[test]
    fn test_append_then_validate() {
        let mut frame = vec![0xAC, 0x40, 0x00, 0x00, 0x01];
        append_checksum(&mut frame);
        assert_eq!(*frame.last().unwrap(), 0xED);
        assert_eq!(validate(&frame).unwrap(), &frame[..frame.len() - 1]);
    }

    #[test]
    fn test_validate_rejects_corruption() {
        let mut frame = vec![0x10, 0x20, 0x30];
        append_checksum(&mut frame);
        frame[1] ^= 0x04;
        assert_eq!(
            validate(&frame),
            Err(ProtocolError::ChecksumMismatch {
                expected: 0x64,
                actual: 0x60,
            })
        );
    }

    #[test]
    fn test_validate_empty_frame() {
        assert_eq!(
            validate(&[]),
            Err(ProtocolError::FrameTooShort {
                expected: 1,
                actual: 0
            })
        );
    }
}
