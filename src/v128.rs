//! 128-bit vector payloads.
//!
//! The 16 bytes hold the low half first, then the high half, each
//! little-endian. Read as one little-endian `u128`, the buffer equals
//! `(high << 64) | low`.

use std::fmt;

/// An opaque 128-bit vector value. Lane interpretation is left to the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct V128([u8; 16]);

impl V128 {
    /// Pack two 64-bit halves.
    pub fn new(high: u64, low: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&low.to_le_bytes());
        bytes[8..].copy_from_slice(&high.to_le_bytes());
        V128(bytes)
    }

    /// Unpack into `(high, low)`.
    pub fn get(self) -> (u64, u64) {
        let mut low = [0u8; 8];
        let mut high = [0u8; 8];
        low.copy_from_slice(&self.0[..8]);
        high.copy_from_slice(&self.0[8..]);
        (u64::from_le_bytes(high), u64::from_le_bytes(low))
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        V128(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    pub const fn as_u128(self) -> u128 {
        u128::from_le_bytes(self.0)
    }
}

impl From<u128> for V128 {
    fn from(v: u128) -> Self {
        V128(v.to_le_bytes())
    }
}

impl From<V128> for u128 {
    fn from(v: V128) -> u128 {
        v.as_u128()
    }
}

impl fmt::Debug for V128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V128(0x{:032x})", self.as_u128())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_example() {
        let v = V128::new(0x1122334455667788, 0x99AABBCCDDEEFF00);
        assert_eq!(v.get(), (0x1122334455667788, 0x99AABBCCDDEEFF00));
    }

    #[test]
    fn byte_layout_is_low_half_first() {
        let v = V128::new(0x1122334455667788, 0x99AABBCCDDEEFF00);
        assert_eq!(
            v.to_bytes(),
            [
                0x00, 0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA, 0x99, // low
                0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, // high
            ]
        );
        assert_eq!(v.as_u128(), 0x1122334455667788_99AABBCCDDEEFF00);
    }

    #[test]
    fn u128_view_matches_halves() {
        for (high, low) in [(0, 0), (u64::MAX, 0), (0, u64::MAX), (1, 2), (u64::MAX, u64::MAX)] {
            let packed = V128::new(high, low);
            assert_eq!(packed.as_u128(), ((high as u128) << 64) | low as u128);
            assert_eq!(V128::from(packed.as_u128()), packed);
        }
    }
}
