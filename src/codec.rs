//! Conversions between host values and native value cells.
//!
//! A native cell carries no tag, so decoding always takes the declared type
//! of the slot from the caller. The extern registry is consulted only when
//! decoding an `externref`, and only to read.

use tracing::debug;

use crate::{
    error::{BridgeError, Result},
    raw::RawVal,
    refs::{ExternRef, FuncRef},
    registry::ExternRegistry,
    types::{Val, ValType},
};

/// Encode one host value.
///
/// Fails if `val` is an extern reference that has already been released.
pub fn encode(val: &Val) -> Result<RawVal> {
    Ok(match *val {
        Val::I32(x) => RawVal::i32(x),
        Val::I64(x) => RawVal::i64(x),
        Val::F32(x) => RawVal::f32(x),
        Val::F64(x) => RawVal::f64(x),
        Val::V128(x) => RawVal::v128(x),
        Val::FuncRef(r) => RawVal::funcref(r.index()),
        Val::ExternRef(ExternRef::Live(h)) => RawVal::externref(h),
        Val::ExternRef(ExternRef::Released(h)) => {
            debug!(handle = %h, "refusing to encode released extern reference");
            return Err(BridgeError::ReleasedReference(h));
        }
    })
}

/// Like [`encode`], but a `Live` extern reference must also still be
/// registered in `registry`.
pub fn encode_live(val: &Val, registry: &ExternRegistry) -> Result<RawVal> {
    if let Val::ExternRef(ExternRef::Live(h)) = *val {
        if !registry.contains(h) {
            debug!(handle = %h, "refusing to encode extern reference absent from registry");
            return Err(BridgeError::ReleasedReference(h));
        }
    }
    encode(val)
}

/// Decode one native cell as a value of type `ty`.
///
/// An `externref` whose handle is not live in `registry` (including the null
/// handle) decodes to [`ExternRef::Released`]; that is not an error.
pub fn decode(raw: RawVal, ty: ValType, registry: &ExternRegistry) -> Val {
    match ty {
        ValType::I32 => Val::I32(raw.get_i32()),
        ValType::I64 => Val::I64(raw.get_i64()),
        ValType::F32 => Val::F32(raw.get_f32()),
        ValType::F64 => Val::F64(raw.get_f64()),
        ValType::V128 => Val::V128(raw.get_v128()),
        ValType::FuncRef => Val::FuncRef(FuncRef::new(raw.get_funcref())),
        ValType::ExternRef => {
            let h = raw.get_externref();
            if registry.contains(h) {
                Val::ExternRef(ExternRef::Live(h))
            } else {
                Val::ExternRef(ExternRef::Released(h))
            }
        }
    }
}

/// Decode using the engine's binary type code.
pub fn decode_code(raw: RawVal, code: u8, registry: &ExternRegistry) -> Result<Val> {
    let ty = ValType::try_from(code)?;
    Ok(decode(raw, ty, registry))
}

/// Encode an argument list. Stops at the first released reference.
pub fn encode_all(vals: &[Val]) -> Result<Vec<RawVal>> {
    vals.iter().map(encode).collect()
}

/// [`encode_all`] with the registry check of [`encode_live`].
pub fn encode_all_live(vals: &[Val], registry: &ExternRegistry) -> Result<Vec<RawVal>> {
    vals.iter().map(|v| encode_live(v, registry)).collect()
}

/// Decode a result list; `raws` and `types` must have the same length.
pub fn decode_all(
    raws: &[RawVal],
    types: &[ValType],
    registry: &ExternRegistry,
) -> Result<Vec<Val>> {
    if raws.len() != types.len() {
        return Err(BridgeError::ArityMismatch {
            expected: types.len(),
            found: raws.len(),
        });
    }
    Ok(raws
        .iter()
        .zip(types)
        .map(|(&raw, &ty)| decode(raw, ty, registry))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{refs::Handle, v128::V128};

    fn roundtrip(v: &Val) -> Val {
        let reg = ExternRegistry::new();
        decode(encode(v).unwrap(), v.ty(), &reg)
    }

    #[test]
    fn scalars_roundtrip() {
        for v in [
            Val::I32(i32::MIN),
            Val::I32(-1),
            Val::I64(i64::MAX),
            Val::F32(1.5),
            Val::F64(-0.0),
            Val::V128(V128::new(3, 4)),
            Val::FuncRef(FuncRef::new(9)),
        ] {
            assert_eq!(roundtrip(&v), v);
        }
    }

    #[test]
    fn nan_bits_survive() {
        let bits = 0x7FF4_0000_0000_0001u64;
        let out = roundtrip(&Val::F64(f64::from_bits(bits))).as_f64().unwrap();
        assert_eq!(out.to_bits(), bits);
        let bits = 0xFFA0_0001u32;
        let out = roundtrip(&Val::F32(f32::from_bits(bits))).as_f32().unwrap();
        assert_eq!(out.to_bits(), bits);
    }

    #[test]
    fn externref_liveness_tracks_registry() {
        let reg = ExternRegistry::new();
        let r = reg.new_ref("obj");
        let h = r.handle();
        let raw = encode(&Val::ExternRef(r)).unwrap();
        assert_eq!(decode(raw, ValType::ExternRef, &reg), Val::ExternRef(ExternRef::Live(h)));

        reg.release(h);
        assert_eq!(
            decode(raw, ValType::ExternRef, &reg),
            Val::ExternRef(ExternRef::Released(h))
        );
        assert_eq!(
            decode(RawVal::ZERO, ValType::ExternRef, &reg),
            Val::ExternRef(ExternRef::null())
        );
    }

    #[test]
    fn released_ref_is_rejected() {
        let err = encode(&Val::ExternRef(ExternRef::Released(Handle(3)))).unwrap_err();
        assert_eq!(err, BridgeError::ReleasedReference(Handle(3)));
        assert_eq!(err.to_string(), "external reference #3 is released");
    }

    #[test]
    fn live_ref_missing_from_registry_is_rejected() {
        let reg = ExternRegistry::new();
        let duplicate = Val::ExternRef(ExternRef::Live(Handle(1)));
        assert_eq!(
            encode_live(&duplicate, &reg),
            Err(BridgeError::ReleasedReference(Handle(1)))
        );
        assert!(encode(&duplicate).is_ok());

        let r = reg.new_ref(5u8);
        assert_eq!(r.handle(), Handle(1));
        assert!(encode_live(&duplicate, &reg).is_ok());
        assert_eq!(
            encode_all_live(&[Val::I32(1), Val::ExternRef(ExternRef::Live(Handle(2)))], &reg),
            Err(BridgeError::ReleasedReference(Handle(2)))
        );
    }

    #[test]
    fn unknown_code_is_rejected() {
        let reg = ExternRegistry::new();
        assert_eq!(
            decode_code(RawVal::i32(1), 0x40, &reg),
            Err(BridgeError::UnknownValType(0x40))
        );
        assert_eq!(decode_code(RawVal::i32(1), 0x7F, &reg), Ok(Val::I32(1)));
    }

    #[test]
    fn slices() {
        let reg = ExternRegistry::new();
        let vals = [Val::I32(1), Val::F64(2.0), Val::I64(3)];
        let raws = encode_all(&vals).unwrap();
        let back = decode_all(&raws, &[ValType::I32, ValType::F64, ValType::I64], &reg).unwrap();
        assert_eq!(back, vals);
        assert_eq!(
            decode_all(&raws, &[ValType::I32], &reg),
            Err(BridgeError::ArityMismatch { expected: 1, found: 3 })
        );
        assert!(decode_all(&[], &[], &reg).unwrap().is_empty());
    }
}
