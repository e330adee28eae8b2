//! Reference values carried across the boundary.

use std::fmt;

/// A reference to an engine function, by function index.
///
/// Funcrefs are resolved by the engine itself; the bridge never looks them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuncRef {
    index: u32,
}

impl FuncRef {
    pub fn new(func_index: u32) -> Self {
        FuncRef { index: func_index }
    }

    pub fn index(self) -> u32 {
        self.index
    }
}

/// Integer key of an entry in the [`ExternRegistry`](crate::registry::ExternRegistry).
///
/// `0` is the null reference and never names a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Handle(pub u64);

impl Handle {
    pub const NULL: Handle = Handle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reference to a host object registered with an extern registry.
///
/// A `Live` reference was resolvable when it was produced. A `Released` one
/// must not be handed back to the engine: encoding it fails.
///
/// `ExternRef` is neither `Copy` nor `Clone`. Releasing a live reference
/// consumes it, so no live copy outlives the release:
///
/// ```compile_fail
/// use vmbridge::{Bridge, Val};
///
/// let bridge = Bridge::new();
/// let r = bridge.new_extern_ref("a");
/// let _released = bridge.release(r);
/// bridge.encode(&Val::ExternRef(r)).unwrap();
/// ```
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum ExternRef {
    Live(Handle),
    Released(Handle),
}

impl ExternRef {
    /// The null extern reference.
    pub const fn null() -> Self {
        ExternRef::Released(Handle::NULL)
    }

    pub fn handle(&self) -> Handle {
        match *self {
            ExternRef::Live(h) | ExternRef::Released(h) => h,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ExternRef::Live(_))
    }

    /// The same handle, marked released.
    pub fn into_released(self) -> Self {
        ExternRef::Released(self.handle())
    }
}
