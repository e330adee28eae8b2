use std::{any::Any, sync::Arc};

use crate::{
    codec,
    error::Result,
    raw::RawVal,
    refs::ExternRef,
    registry::ExternRegistry,
    types::{Val, ValType},
};

/// Top-level bridge context.
///
/// Owns a shared handle to one extern registry. Engine instances that pass
/// extern references to each other must go through the same registry, so they
/// should share a `Bridge` (or build theirs with [`Bridge::with_registry`]).
/// Instances that never exchange references can each have their own.
#[derive(Debug, Clone)]
pub struct Bridge {
    registry: Arc<ExternRegistry>,
}

impl Bridge {
    pub fn new() -> Self {
        Bridge {
            registry: Arc::new(ExternRegistry::new()),
        }
    }

    pub fn with_registry(registry: Arc<ExternRegistry>) -> Self {
        Bridge { registry }
    }

    pub fn registry(&self) -> &Arc<ExternRegistry> {
        &self.registry
    }

    /// Register a host object and return a live reference to it.
    pub fn new_extern_ref<T: Any + Send + Sync>(&self, obj: T) -> ExternRef {
        self.registry.new_ref(obj)
    }

    pub fn release(&self, r: ExternRef) -> ExternRef {
        self.registry.release_ref(r)
    }

    /// Encode one value. A live extern reference must still be registered
    /// with this bridge's registry.
    pub fn encode(&self, val: &Val) -> Result<RawVal> {
        codec::encode_live(val, &self.registry)
    }

    pub fn decode(&self, raw: RawVal, ty: ValType) -> Val {
        codec::decode(raw, ty, &self.registry)
    }

    pub fn encode_all(&self, vals: &[Val]) -> Result<Vec<RawVal>> {
        codec::encode_all_live(vals, &self.registry)
    }

    pub fn decode_all(&self, raws: &[RawVal], types: &[ValType]) -> Result<Vec<Val>> {
        codec::decode_all(raws, types, &self.registry)
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
