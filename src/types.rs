use std::fmt;

use crate::{
    error::BridgeError,
    refs::{ExternRef, FuncRef},
    v128::V128,
};

/// Value types understood by the engine, keyed by their binary type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValType {
    I32 = 0x7F,
    I64 = 0x7E,
    F32 = 0x7D,
    F64 = 0x7C,
    V128 = 0x7B,
    FuncRef = 0x70,
    ExternRef = 0x6F,
}

impl ValType {
    pub fn from_u8(b: u8) -> Option<Self> {
        match b {
            0x7F => Some(ValType::I32),
            0x7E => Some(ValType::I64),
            0x7D => Some(ValType::F32),
            0x7C => Some(ValType::F64),
            0x7B => Some(ValType::V128),
            0x70 => Some(ValType::FuncRef),
            0x6F => Some(ValType::ExternRef),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValType::I32 => "i32",
            ValType::I64 => "i64",
            ValType::F32 => "f32",
            ValType::F64 => "f64",
            ValType::V128 => "v128",
            ValType::FuncRef => "funcref",
            ValType::ExternRef => "externref",
        }
    }

    pub fn is_num(self) -> bool {
        matches!(self, ValType::I32 | ValType::I64 | ValType::F32 | ValType::F64)
    }

    pub fn is_ref(self) -> bool {
        self.as_ref_type().is_some()
    }

    pub fn as_ref_type(self) -> Option<RefType> {
        match self {
            ValType::FuncRef => Some(RefType::FuncRef),
            ValType::ExternRef => Some(RefType::ExternRef),
            _ => None,
        }
    }
}

impl TryFrom<u8> for ValType {
    type Error = BridgeError;
    fn try_from(b: u8) -> Result<Self, BridgeError> {
        ValType::from_u8(b).ok_or(BridgeError::UnknownValType(b))
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of value types that are references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RefType {
    FuncRef = 0x70,
    ExternRef = 0x6F,
}

impl RefType {
    pub fn from_u8(b: u8) -> Option<Self> {
        match b {
            0x70 => Some(RefType::FuncRef),
            0x6F => Some(RefType::ExternRef),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        ValType::from(self).name()
    }
}

impl From<RefType> for ValType {
    fn from(r: RefType) -> ValType {
        match r {
            RefType::FuncRef => ValType::FuncRef,
            RefType::ExternRef => ValType::ExternRef,
        }
    }
}

impl TryFrom<u8> for RefType {
    type Error = BridgeError;
    fn try_from(b: u8) -> Result<Self, BridgeError> {
        RefType::from_u8(b).ok_or(BridgeError::UnknownRefType(b))
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutability of a global slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mutability {
    Const = 0,
    Var = 1,
}

impl Mutability {
    pub fn from_u8(b: u8) -> Option<Self> {
        match b {
            0 => Some(Mutability::Const),
            1 => Some(Mutability::Var),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mutability::Const => "const",
            Mutability::Var => "var",
        }
    }
}

impl TryFrom<u8> for Mutability {
    type Error = BridgeError;
    fn try_from(b: u8) -> Result<Self, BridgeError> {
        Mutability::from_u8(b).ok_or(BridgeError::UnknownMutability(b))
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A host-side value, tagged with its engine type.
///
/// Not `Copy`: a `Val` may own an [`ExternRef`].
#[derive(Debug, PartialEq)]
pub enum Val {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    V128(V128),
    FuncRef(FuncRef),
    ExternRef(ExternRef),
}

impl Val {
    pub fn ty(&self) -> ValType {
        match self {
            Val::I32(_) => ValType::I32,
            Val::I64(_) => ValType::I64,
            Val::F32(_) => ValType::F32,
            Val::F64(_) => ValType::F64,
            Val::V128(_) => ValType::V128,
            Val::FuncRef(_) => ValType::FuncRef,
            Val::ExternRef(_) => ValType::ExternRef,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        if let Val::I32(v) = *self {
            Some(v)
        } else {
            None
        }
    }
    pub fn as_i64(&self) -> Option<i64> {
        if let Val::I64(v) = *self {
            Some(v)
        } else {
            None
        }
    }
    pub fn as_f32(&self) -> Option<f32> {
        if let Val::F32(v) = *self {
            Some(v)
        } else {
            None
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        if let Val::F64(v) = *self {
            Some(v)
        } else {
            None
        }
    }
    pub fn as_v128(&self) -> Option<V128> {
        if let Val::V128(v) = *self {
            Some(v)
        } else {
            None
        }
    }
    pub fn as_func_ref(&self) -> Option<FuncRef> {
        if let Val::FuncRef(v) = *self {
            Some(v)
        } else {
            None
        }
    }
    pub fn as_extern_ref(&self) -> Option<&ExternRef> {
        if let Val::ExternRef(v) = self {
            Some(v)
        } else {
            None
        }
    }
    pub fn into_extern_ref(self) -> Option<ExternRef> {
        if let Val::ExternRef(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

// ── Host type conversions ─────────────────────────────────────────────────────
//
// Unsigned integers are reinterpreted as two's complement of the same width;
// there is no range check.

impl From<i32> for Val {
    fn from(v: i32) -> Val {
        Val::I32(v)
    }
}

impl From<u32> for Val {
    fn from(v: u32) -> Val {
        Val::I32(v as i32)
    }
}

impl From<i64> for Val {
    fn from(v: i64) -> Val {
        Val::I64(v)
    }
}

impl From<u64> for Val {
    fn from(v: u64) -> Val {
        Val::I64(v as i64)
    }
}

#[cfg(target_pointer_width = "32")]
impl From<isize> for Val {
    fn from(v: isize) -> Val {
        Val::I32(v as i32)
    }
}

#[cfg(target_pointer_width = "32")]
impl From<usize> for Val {
    fn from(v: usize) -> Val {
        Val::I32(v as i32)
    }
}

#[cfg(not(target_pointer_width = "32"))]
impl From<isize> for Val {
    fn from(v: isize) -> Val {
        Val::I64(v as i64)
    }
}

#[cfg(not(target_pointer_width = "32"))]
impl From<usize> for Val {
    fn from(v: usize) -> Val {
        Val::I64(v as i64)
    }
}

impl From<f32> for Val {
    fn from(v: f32) -> Val {
        Val::F32(v)
    }
}

impl From<f64> for Val {
    fn from(v: f64) -> Val {
        Val::F64(v)
    }
}

impl From<V128> for Val {
    fn from(v: V128) -> Val {
        Val::V128(v)
    }
}

impl From<u128> for Val {
    fn from(v: u128) -> Val {
        Val::V128(V128::from(v))
    }
}

impl From<FuncRef> for Val {
    fn from(v: FuncRef) -> Val {
        Val::FuncRef(v)
    }
}

impl From<ExternRef> for Val {
    fn from(v: ExternRef) -> Val {
        Val::ExternRef(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_roundtrip() {
        for ty in [
            ValType::I32,
            ValType::I64,
            ValType::F32,
            ValType::F64,
            ValType::V128,
            ValType::FuncRef,
            ValType::ExternRef,
        ] {
            assert_eq!(ValType::from_u8(ty as u8), Some(ty));
        }
        assert_eq!(ValType::try_from(0x00), Err(BridgeError::UnknownValType(0x00)));
        assert_eq!(RefType::try_from(0x7F), Err(BridgeError::UnknownRefType(0x7F)));
        assert_eq!(Mutability::try_from(2), Err(BridgeError::UnknownMutability(2)));
    }

    #[test]
    fn names() {
        assert_eq!(ValType::V128.to_string(), "v128");
        assert_eq!(ValType::ExternRef.to_string(), "externref");
        assert_eq!(RefType::FuncRef.to_string(), "funcref");
        assert_eq!(Mutability::Const.to_string(), "const");
        assert_eq!(Mutability::Var.to_string(), "var");
    }

    #[test]
    fn ref_types_project_into_val_types() {
        assert_eq!(ValType::from(RefType::ExternRef), ValType::ExternRef);
        assert_eq!(ValType::FuncRef.as_ref_type(), Some(RefType::FuncRef));
        assert!(ValType::ExternRef.is_ref());
        assert!(!ValType::V128.is_ref());
        assert!(!ValType::V128.is_num());
        assert!(ValType::F64.is_num());
    }

    #[test]
    fn unsigned_ints_wrap() {
        assert_eq!(Val::from(u32::MAX), Val::I32(-1));
        assert_eq!(Val::from(0x8000_0000_0000_0000u64), Val::I64(i64::MIN));
    }

    #[test]
    fn pointer_sized_ints_follow_target_width() {
        let v = Val::from(-5isize);
        if cfg!(target_pointer_width = "32") {
            assert_eq!(v, Val::I32(-5));
        } else {
            assert_eq!(v, Val::I64(-5));
        }
        match Val::from(usize::MAX) {
            Val::I32(x) => assert_eq!(x, -1),
            Val::I64(x) => assert_eq!(x, -1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
