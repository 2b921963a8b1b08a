//! Cyclic memory addresses.
//!
//! The module's logging memory is a ring buffer of 8192 slots. On the wire
//! an address is a 3-byte triple with a non-contiguous bit layout:
//!
//! ```text
//! byte 0, bits 7..6: index bits 1..0
//! byte 1, bits 7..1: index bits 8..2
//! byte 2, bits 3..0: index bits 12..9
//! ```
//!
//! The layout is exactly invertible; it is reproduced as observed on real
//! hardware, the vendor never documented it.

use crate::constants::MEMORY_SLOTS;

/// A slot in the module's cyclic logging memory.
///
/// Stored in its canonical 3-byte wire form. The all-ones triple is a
/// reserved sentinel meaning "no data logged yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Address([u8; 3]);

impl Address {
    /// Sentinel reported by an empty module instead of a real address.
    pub const NO_DATA: Address = Address([0xFF, 0xFF, 0xFF]);

    /// Encode a logical index as a wire address.
    ///
    /// The index is taken modulo the 8192-slot memory size, so arithmetic
    /// that walks past the end of the ring wraps naturally.
    pub fn new(index: u16) -> Self {
        let index = u32::from(index % MEMORY_SLOTS);
        Address([
            (index << 6) as u8,
            ((index >> 1) & 0xFE) as u8,
            (index >> 9) as u8,
        ])
    }

    /// Wrap a raw wire triple without interpreting it.
    pub fn from_wire(wire: [u8; 3]) -> Self {
        Address(wire)
    }

    /// The 3-byte wire form.
    pub fn wire(&self) -> [u8; 3] {
        self.0
    }

    /// Whether this is the reserved "no data" sentinel.
    pub fn is_no_data(&self) -> bool {
        *self == Self::NO_DATA
    }

    /// Decode the logical index from the wire form.
    ///
    /// Only meaningful for triples produced by [`Address::new`]; the
    /// sentinel has no logical index.
    pub fn index(&self) -> u16 {
        let [b0, b1, b2] = self.0.map(u32::from);
        (((b0 >> 6) + (b1 << 1) + (b2 << 9)) % u32::from(MEMORY_SLOTS)) as u16
    }

    /// The address `count` slots further along the ring.
    pub fn offset(&self, count: u16) -> Address {
        Address::new(((u32::from(self.index()) + u32::from(count)) % u32::from(MEMORY_SLOTS)) as u16)
    }

    /// Number of samples stored between `start` and `end`, both inclusive.
    ///
    /// Accounts for wraparound of the ring; two sentinel addresses mean the
    /// memory is empty and yield 0.
    pub fn sample_count(start: Address, end: Address) -> u16 {
        if start.is_no_data() && end.is_no_data() {
            return 0;
        }
        let (start, end) = (start.index(), end.index());
        if end >= start {
            end - start + 1
        } else {
            end + MEMORY_SLOTS - start + 1
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_no_data() {
            write!(f, "<no data>")
        } else {
            write!(f, "{}", self.index())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_wire_layout() {
        assert_eq!(Address::new(0).wire(), [0x00, 0x00, 0x00]);
        assert_eq!(Address::new(1).wire(), [0x40, 0x00, 0x00]);
        assert_eq!(Address::new(4).wire(), [0x00, 0x02, 0x00]);
        assert_eq!(Address::new(8191).wire(), [0xC0, 0xFE, 0x0F]);
    }

    #[test]
    fn test_roundtrip_every_index() {
        for index in 0..8192u16 {
            let address = Address::new(index);
            assert_eq!(address.index(), index, "index mismatch at {index}");
            assert_eq!(
                Address::from_wire(address.wire()),
                address,
                "wire mismatch at {index}"
            );
        }
    }

    #[test]
    fn test_sample_count_single_slot() {
        let address = Address::new(42);
        assert_eq!(Address::sample_count(address, address), 1);
    }

    #[test]
    fn test_sample_count_forward() {
        assert_eq!(Address::sample_count(Address::new(10), Address::new(19)), 10);
    }

    #[test]
    fn test_sample_count_wraparound() {
        assert_eq!(
            Address::sample_count(Address::new(8000), Address::new(100)),
            293
        );
        // End one slot before start covers the whole ring.
        assert_eq!(
            Address::sample_count(Address::new(5), Address::new(4)),
            8192
        );
    }

    #[test]
    fn test_sample_count_sentinel() {
        assert_eq!(Address::sample_count(Address::NO_DATA, Address::NO_DATA), 0);
        assert!(Address::NO_DATA.is_no_data());
        assert!(!Address::new(0).is_no_data());
    }

    #[test]
    fn test_offset_wraps() {
        assert_eq!(Address::new(8190).offset(3), Address::new(1));
        assert_eq!(Address::new(0).offset(8192), Address::new(0));
    }
}
