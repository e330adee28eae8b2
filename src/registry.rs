//! The foreign reference table.
//!
//! Host objects are made visible to the engine as small integer handles. The
//! engine only ever sees the handle; the object stays owned by the host and
//! the registry keeps a shared pointer to it for lookup.
//!
//! A single mutex guards the whole slot map, so register, lookup and release
//! never observe each other half-done. Critical sections do not allocate
//! on the host's behalf or call back into host code.

use std::{
    any::Any,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, trace};

use crate::{
    refs::{ExternRef, Handle},
    slots::Slots,
};

/// An opaque, shareable host object.
pub type HostObject = Arc<dyn Any + Send + Sync>;

/// Thread-safe handle table for host objects referenced from the engine.
pub struct ExternRegistry {
    slots: Mutex<Slots<HostObject>>,
}

impl ExternRegistry {
    pub fn new() -> Self {
        ExternRegistry {
            slots: Mutex::new(Slots::new()),
        }
    }

    /// Pre-size the table for `capacity` live handles.
    pub fn with_capacity(capacity: usize) -> Self {
        ExternRegistry {
            slots: Mutex::new(Slots::with_capacity(capacity)),
        }
    }

    // Every critical section is panic-free, so a poisoned lock still guards a
    // consistent table.
    fn lock(&self) -> MutexGuard<'_, Slots<HostObject>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a host object. Never returns [`Handle::NULL`].
    pub fn register<T: Any + Send + Sync>(&self, obj: T) -> Handle {
        self.register_object(Arc::new(obj))
    }

    pub fn register_object(&self, obj: HostObject) -> Handle {
        let handle = self.lock().insert(obj);
        trace!(%handle, "extern reference registered");
        handle
    }

    /// The object behind `handle`, or `None` if it was never issued or has
    /// been released.
    pub fn lookup(&self, handle: Handle) -> Option<HostObject> {
        let found = self.lock().get(handle).cloned();
        if found.is_none() {
            trace!(%handle, "extern reference lookup missed");
        }
        found
    }

    /// Like [`lookup`](Self::lookup), downcast to a concrete type.
    pub fn lookup_as<T: Any + Send + Sync>(&self, handle: Handle) -> Option<Arc<T>> {
        self.lookup(handle)?.downcast::<T>().ok()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.lock().contains(handle)
    }

    /// Drop the table entry for `handle` and make the handle reusable.
    ///
    /// Releasing an absent handle is a no-op. The host object itself lives
    /// on for as long as other `Arc`s to it do.
    pub fn release(&self, handle: Handle) -> Option<HostObject> {
        let removed = self.lock().remove(handle);
        match removed {
            Some(_) => trace!(%handle, "extern reference released"),
            None => debug!(%handle, "release of absent extern reference ignored"),
        }
        removed
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The handle the next register call would mint if nothing is free.
    pub fn next_handle(&self) -> Handle {
        self.lock().next_fresh()
    }

    // ── Reference-level helpers ──────────────────────────────────────────────

    /// Register `obj` and wrap the handle as a live extern reference.
    pub fn new_ref<T: Any + Send + Sync>(&self, obj: T) -> ExternRef {
        ExternRef::Live(self.register(obj))
    }

    /// Resolve a live reference. Released references never resolve.
    pub fn get_ref(&self, r: &ExternRef) -> Option<HostObject> {
        match *r {
            ExternRef::Live(h) => self.lookup(h),
            ExternRef::Released(_) => None,
        }
    }

    pub fn get_ref_as<T: Any + Send + Sync>(&self, r: &ExternRef) -> Option<Arc<T>> {
        self.get_ref(r)?.downcast::<T>().ok()
    }

    /// Release the handle behind `r` and return the reference in its
    /// released state. Already-released references are returned unchanged.
    ///
    /// Takes `r` by value: the live reference is gone once this returns.
    pub fn release_ref(&self, r: ExternRef) -> ExternRef {
        if let ExternRef::Live(h) = r {
            self.release(h);
        }
        r.into_released()
    }
}

impl Default for ExternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.lock();
        f.debug_struct("ExternRegistry")
            .field("live", &slots.len())
            .field("free", &slots.free_len())
            .field("next", &slots.next_fresh())
            .finish()
    }
}
