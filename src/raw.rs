//! The engine's native value cell.
//!
//! A `RawVal` is a fixed 16-byte, untagged union. The reader must already know
//! which lane is meaningful; see [`codec::decode`](crate::codec::decode).
//! Every lane is stored little-endian and every constructor zeroes all 16
//! bytes first, so any lane may be read back without touching uninitialized
//! memory.

use std::fmt;

use crate::{refs::Handle, v128::V128};

#[derive(Clone, Copy)]
#[repr(C)]
pub union RawVal {
    pub i32: i32,
    pub i64: i64,
    /// `f32::to_bits`, so NaN payloads pass through untouched.
    pub f32: u32,
    /// `f64::to_bits`.
    pub f64: u64,
    pub v128: [u8; 16],
    /// Function index.
    pub funcref: u32,
    /// Extern registry handle.
    pub externref: u64,
}

impl RawVal {
    pub const ZERO: RawVal = RawVal { v128: [0; 16] };

    pub fn i32(v: i32) -> RawVal {
        let mut raw = RawVal::ZERO;
        raw.i32 = v.to_le();
        raw
    }

    pub fn i64(v: i64) -> RawVal {
        let mut raw = RawVal::ZERO;
        raw.i64 = v.to_le();
        raw
    }

    pub fn f32(v: f32) -> RawVal {
        let mut raw = RawVal::ZERO;
        raw.f32 = v.to_bits().to_le();
        raw
    }

    pub fn f64(v: f64) -> RawVal {
        let mut raw = RawVal::ZERO;
        raw.f64 = v.to_bits().to_le();
        raw
    }

    pub fn v128(v: V128) -> RawVal {
        RawVal { v128: v.to_bytes() }
    }

    pub fn funcref(index: u32) -> RawVal {
        let mut raw = RawVal::ZERO;
        raw.funcref = index.to_le();
        raw
    }

    pub fn externref(handle: Handle) -> RawVal {
        let mut raw = RawVal::ZERO;
        raw.externref = handle.get().to_le();
        raw
    }

    pub fn from_bytes(bytes: [u8; 16]) -> RawVal {
        RawVal { v128: bytes }
    }

    pub fn to_bytes(self) -> [u8; 16] {
        // Safety: all lanes are plain integers; every bit pattern is valid.
        unsafe { self.v128 }
    }

    pub fn get_i32(self) -> i32 {
        // Safety: see `to_bytes`.
        i32::from_le(unsafe { self.i32 })
    }

    pub fn get_i64(self) -> i64 {
        // Safety: see `to_bytes`.
        i64::from_le(unsafe { self.i64 })
    }

    pub fn get_f32(self) -> f32 {
        // Safety: see `to_bytes`.
        f32::from_bits(u32::from_le(unsafe { self.f32 }))
    }

    pub fn get_f64(self) -> f64 {
        // Safety: see `to_bytes`.
        f64::from_bits(u64::from_le(unsafe { self.f64 }))
    }

    pub fn get_v128(self) -> V128 {
        V128::from_bytes(self.to_bytes())
    }

    pub fn get_funcref(self) -> u32 {
        // Safety: see `to_bytes`.
        u32::from_le(unsafe { self.funcref })
    }

    pub fn get_externref(self) -> Handle {
        // Safety: see `to_bytes`.
        Handle(u64::from_le(unsafe { self.externref }))
    }
}

impl Default for RawVal {
    fn default() -> Self {
        RawVal::ZERO
    }
}

impl PartialEq for RawVal {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for RawVal {}

impl fmt::Debug for RawVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawVal(0x{:032x})", u128::from_le_bytes(self.to_bytes()))
    }
}
