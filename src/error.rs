use thiserror::Error;

use crate::refs::Handle;

/// Usage errors raised at the host/engine value boundary.
///
/// None of these are recoverable: each one means the caller handed the
/// bridge something that cannot be interpreted safely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("unknown value type code: {0:#04x}")]
    UnknownValType(u8),

    #[error("unknown reference type code: {0:#04x}")]
    UnknownRefType(u8),

    #[error("unknown mutability code: {0:#04x}")]
    UnknownMutability(u8),

    #[error("external reference {0} is released")]
    ReleasedReference(Handle),

    #[error("arity mismatch: expected {expected} values, found {found}")]
    ArityMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
