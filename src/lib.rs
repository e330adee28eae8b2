//! vmbridge — value bridge and foreign-reference table for an embedded
//! Wasm-style engine.
//!
//! Host values are converted to the engine's fixed 16-byte [`RawVal`] cell
//! and back. Host objects are exposed to the engine as integer handles
//! through an [`ExternRegistry`]; the engine never sees a host pointer.
//!
//! # Quick start
//!
//! ```rust
//! use vmbridge::{Bridge, Val, ValType};
//!
//! let bridge = Bridge::new();
//! let conn = bridge.new_extern_ref(String::from("db-connection"));
//!
//! // Arguments on the way into the engine.
//! let args = bridge.encode_all(&[Val::I32(7), Val::ExternRef(conn)]).unwrap();
//!
//! // Results on the way out, typed by the callee's signature.
//! let results = bridge.decode_all(&args, &[ValType::I32, ValType::ExternRef]).unwrap();
//! let back = results.into_iter().nth(1).and_then(Val::into_extern_ref).unwrap();
//! assert!(back.is_valid());
//! assert_eq!(
//!     bridge.registry().get_ref_as::<String>(&back).as_deref().map(String::as_str),
//!     Some("db-connection"),
//! );
//!
//! // Release consumes the live reference; what comes back can no longer be
//! // passed to the engine.
//! let gone = bridge.release(back);
//! assert!(bridge.encode(&Val::ExternRef(gone)).is_err());
//! ```

pub mod bridge;
pub mod codec;
pub mod error;
pub mod ffi;
pub mod raw;
pub mod refs;
pub mod registry;
pub mod slots;
pub mod types;
pub mod v128;

pub use bridge::Bridge;
pub use error::{BridgeError, Result};
pub use raw::RawVal;
pub use refs::{ExternRef, FuncRef, Handle};
pub use registry::{ExternRegistry, HostObject};
pub use types::{Mutability, RefType, Val, ValType};
pub use v128::V128;
