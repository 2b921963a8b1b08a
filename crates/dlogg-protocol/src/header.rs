//! Memory header codec.
//!
//! The get-header command returns 13 bytes describing the state of the
//! logging memory:
//!
//! ```text
//! byte  0      identifier
//! byte  1      firmware format version
//! bytes 2..5   write timestamp counter, 24-bit little-endian, 10 s units
//! byte  5      undocumented, left unparsed
//! bytes 6..9   start address (wire triple)
//! bytes 9..12  end address (wire triple)
//! byte  12     checksum over bytes 0..12
//! ```

use crate::address::Address;
use crate::checksum;
use crate::constants::RX_LEN_GET_HEADER;
use crate::error::ProtocolError;

/// Decoded memory header frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoryHeader {
    /// Identifier byte.
    pub identifier: u8,
    /// Firmware format version byte.
    pub version: u8,
    /// Seconds since the module started logging, 10 s resolution.
    pub timestamp_s: u32,
    /// Address of the oldest stored sample.
    pub start: Address,
    /// Address of the newest stored sample.
    pub end: Address,
}

impl MemoryHeader {
    /// Decode a 13-byte header frame.
    pub fn decode(raw: &[u8]) -> Result<Self, ProtocolError> {
        if raw.len() < RX_LEN_GET_HEADER {
            return Err(ProtocolError::FrameTooShort {
                expected: RX_LEN_GET_HEADER,
                actual: raw.len(),
            });
        }
        checksum::validate(&raw[..RX_LEN_GET_HEADER])?;
        Ok(MemoryHeader {
            identifier: raw[0],
            version: raw[1],
            timestamp_s: u32::from_le_bytes([raw[2], raw[3], raw[4], 0]) * 10,
            start: Address::from_wire([raw[6], raw[7], raw[8]]),
            end: Address::from_wire([raw[9], raw[10], raw[11]]),
        })
    }

    /// Number of samples currently stored, accounting for wraparound.
    pub fn sample_count(&self) -> u16 {
        Address::sample_count(self.start, self.end)
    }
}

impl std::fmt::Display for MemoryHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ identifier: 0x{:02X}, version: 0x{:02X}, timestamp: {}s, start: {}, end: {} }}",
            self.identifier, self.version, self.timestamp_s, self.start, self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Vec<u8> {
        let start = Address::new(8000).wire();
        let end = Address::new(100).wire();
        let mut raw = vec![0x9D, 0x01, 0x10, 0x27, 0x00, 0x00];
        raw.extend_from_slice(&start);
        raw.extend_from_slice(&end);
        checksum::append_checksum(&mut raw);
        raw
    }

    #[test]
    fn test_decode_header() {
        let header = MemoryHeader::decode(&sample_header()).unwrap();
        assert_eq!(header.identifier, 0x9D);
        assert_eq!(header.version, 0x01);
        assert_eq!(header.timestamp_s, 100_000);
        assert_eq!(header.start, Address::new(8000));
        assert_eq!(header.end, Address::new(100));
        assert_eq!(header.sample_count(), 293);
    }

    #[test]
    fn test_decode_rejects_corruption() {
        // Flipping any payload bit must surface as a checksum mismatch.
        for byte in 0..12 {
            let mut raw = sample_header();
            raw[byte] ^= 0x01;
            assert!(
                matches!(
                    MemoryHeader::decode(&raw),
                    Err(ProtocolError::ChecksumMismatch { .. })
                ),
                "corruption of byte {byte} not detected"
            );
        }
    }

    #[test]
    fn test_decode_rejects_short_frame() {
        assert_eq!(
            MemoryHeader::decode(&[0x9D; 5]),
            Err(ProtocolError::FrameTooShort {
                expected: 13,
                actual: 5
            })
        );
    }

    #[test]
    fn test_empty_memory_sentinel() {
        let mut raw = vec![0x9D, 0x01, 0x00, 0x00, 0x00, 0x00];
        raw.extend_from_slice(&[0xFF; 6]);
        checksum::append_checksum(&mut raw);
        let header = MemoryHeader::decode(&raw).unwrap();
        assert!(header.start.is_no_data());
        assert_eq!(header.sample_count(), 0);
    }
}
