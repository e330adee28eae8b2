//! C API (FFI) for engines written in C.
//!
//! Value cells cross the boundary by value as the `#[repr(C)]` [`RawVal`]
//! union. Registries are opaque pointers owned by the caller and freed with
//! `vmb_registry_free`. Host objects are registered from Rust only; C code
//! can query and release handles.

#![allow(clippy::missing_safety_doc)]

use std::os::raw::c_char;
use std::sync::Arc;

use crate::{
    codec,
    error::BridgeError,
    raw::RawVal,
    refs::Handle,
    registry::ExternRegistry,
    types::ValType,
    v128::V128,
};

// ── C-compatible status codes ─────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmbStatus {
    Ok                = 0,
    UnknownValType    = 1,
    UnknownRefType    = 2,
    UnknownMutability = 3,
    ReleasedReference = 4,
    ArityMismatch     = 5,
    NullPointer       = 6,
}

impl From<&BridgeError> for VmbStatus {
    fn from(e: &BridgeError) -> Self {
        match e {
            BridgeError::UnknownValType(_)       => VmbStatus::UnknownValType,
            BridgeError::UnknownRefType(_)       => VmbStatus::UnknownRefType,
            BridgeError::UnknownMutability(_)    => VmbStatus::UnknownMutability,
            BridgeError::ReleasedReference(_)    => VmbStatus::ReleasedReference,
            BridgeError::ArityMismatch { .. }    => VmbStatus::ArityMismatch,
        }
    }
}

/// A registry shared with Rust code through an `Arc`.
pub struct CRegistry(Arc<ExternRegistry>);

impl CRegistry {
    pub fn new(registry: Arc<ExternRegistry>) -> Self {
        CRegistry(registry)
    }
}

// ── Value generation ──────────────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn vmb_value_gen_i32(v: i32) -> RawVal {
    RawVal::i32(v)
}

#[no_mangle]
pub extern "C" fn vmb_value_gen_i64(v: i64) -> RawVal {
    RawVal::i64(v)
}

#[no_mangle]
pub extern "C" fn vmb_value_gen_f32(v: f32) -> RawVal {
    RawVal::f32(v)
}

#[no_mangle]
pub extern "C" fn vmb_value_gen_f64(v: f64) -> RawVal {
    RawVal::f64(v)
}

#[no_mangle]
pub extern "C" fn vmb_value_gen_v128(high: u64, low: u64) -> RawVal {
    RawVal::v128(V128::new(high, low))
}

#[no_mangle]
pub extern "C" fn vmb_value_gen_funcref(func_index: u32) -> RawVal {
    RawVal::funcref(func_index)
}

/// Build an externref cell from a registry handle. `0` is the null reference.
#[no_mangle]
pub extern "C" fn vmb_value_gen_externref(handle: u64) -> RawVal {
    RawVal::externref(Handle(handle))
}

// ── Value extraction ──────────────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn vmb_value_get_i32(v: RawVal) -> i32 {
    v.get_i32()
}

#[no_mangle]
pub extern "C" fn vmb_value_get_i64(v: RawVal) -> i64 {
    v.get_i64()
}

#[no_mangle]
pub extern "C" fn vmb_value_get_f32(v: RawVal) -> f32 {
    v.get_f32()
}

#[no_mangle]
pub extern "C" fn vmb_value_get_f64(v: RawVal) -> f64 {
    v.get_f64()
}

/// # Safety
/// `high` and `low` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn vmb_value_get_v128(v: RawVal, high: *mut u64, low: *mut u64) -> VmbStatus {
    if high.is_null() || low.is_null() { return VmbStatus::NullPointer; }
    let (h, l) = v.get_v128().get();
    *high = h;
    *low = l;
    VmbStatus::Ok
}

#[no_mangle]
pub extern "C" fn vmb_value_get_funcref(v: RawVal) -> u32 {
    v.get_funcref()
}

#[no_mangle]
pub extern "C" fn vmb_value_get_externref(v: RawVal) -> u64 {
    v.get_externref().get()
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn vmb_registry_new() -> *mut CRegistry {
    Box::into_raw(Box::new(CRegistry(Arc::new(ExternRegistry::new()))))
}

/// # Safety
/// Must only be called with a pointer returned by `vmb_registry_new` or
/// `CRegistry` boxed by the embedder, and at most once.
#[no_mangle]
pub unsafe extern "C" fn vmb_registry_free(reg: *mut CRegistry) {
    if !reg.is_null() { drop(Box::from_raw(reg)); }
}

/// # Safety
/// `reg` must be a live registry pointer or null.
#[no_mangle]
pub unsafe extern "C" fn vmb_registry_len(reg: *const CRegistry) -> usize {
    match reg.as_ref() {
        Some(r) => r.0.len(),
        None => 0,
    }
}

/// # Safety
/// `reg` must be a live registry pointer or null.
#[no_mangle]
pub unsafe extern "C" fn vmb_registry_contains(reg: *const CRegistry, handle: u64) -> bool {
    match reg.as_ref() {
        Some(r) => r.0.contains(Handle(handle)),
        None => false,
    }
}

/// Release `handle`. Absent handles are ignored.
///
/// # Safety
/// `reg` must be a live registry pointer or null.
#[no_mangle]
pub unsafe extern "C" fn vmb_registry_release(reg: *const CRegistry, handle: u64) -> VmbStatus {
    match reg.as_ref() {
        Some(r) => {
            r.0.release(Handle(handle));
            VmbStatus::Ok
        }
        None => VmbStatus::NullPointer,
    }
}

/// Decode `v` as a value of type `type_code` and, if it is an `externref`,
/// report whether its handle is live. Non-reference types report `false`.
///
/// # Safety
/// `reg` must be a live registry pointer or null; `live` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn vmb_value_is_live_externref(
    reg: *const CRegistry,
    v: RawVal,
    type_code: u8,
    live: *mut bool,
) -> VmbStatus {
    let Some(r) = reg.as_ref() else { return VmbStatus::NullPointer };
    if live.is_null() { return VmbStatus::NullPointer; }
    match codec::decode_code(v, type_code, &r.0) {
        Ok(val) => {
            *live = val.as_extern_ref().is_some_and(|e| e.is_valid());
            VmbStatus::Ok
        }
        Err(e) => VmbStatus::from(&e),
    }
}

/// Check that `type_code` names a value type the bridge can decode.
#[no_mangle]
pub extern "C" fn vmb_val_type_check(type_code: u8) -> VmbStatus {
    match ValType::try_from(type_code) {
        Ok(_) => VmbStatus::Ok,
        Err(e) => VmbStatus::from(&e),
    }
}

// ── Error strings ─────────────────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn vmb_error_string(status: VmbStatus) -> *const c_char {
    let s = match status {
        VmbStatus::Ok                => "ok\0",
        VmbStatus::UnknownValType    => "unknown value type\0",
        VmbStatus::UnknownRefType    => "unknown reference type\0",
        VmbStatus::UnknownMutability => "unknown mutability\0",
        VmbStatus::ReleasedReference => "external reference is released\0",
        VmbStatus::ArityMismatch     => "arity mismatch\0",
        VmbStatus::NullPointer       => "null pointer\0",
    };
    s.as_ptr() as *const c_char
}
