//! Dense slot map with LIFO slot recycling.
//!
//! Handle `h` lives at `entries[h - 1]`, so handle `0` can never be issued.
//! A slot is either occupied or on the free stack, never both.

use crate::refs::Handle;

/// An arena keyed by small non-zero integers.
#[derive(Debug, Clone)]
pub struct Slots<T> {
    entries: Vec<Option<T>>,
    /// Released handles, most recent last.
    free: Vec<Handle>,
    len: usize,
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Slots {
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Slots {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store `value`, reusing the most recently freed handle if there is one.
    pub fn insert(&mut self, value: T) -> Handle {
        let idx = match self.free.pop() {
            // Only `remove` fills the free stack, and only with handles it
            // just emptied.
            Some(h) => (h.get() - 1) as usize,
            None => {
                self.entries.push(None);
                self.entries.len() - 1
            }
        };
        debug_assert!(self.entries[idx].is_none(), "free slot {idx} is occupied");
        self.entries[idx] = Some(value);
        self.len += 1;
        Handle(idx as u64 + 1)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let idx = Self::index(handle)?;
        self.entries.get(idx)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slot_mut(handle)?.as_mut()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Take the value out and recycle its handle. Absent handles are ignored.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let value = self.slot_mut(handle)?.take()?;
        self.free.push(handle);
        self.len -= 1;
        Some(value)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The handle a fresh (non-recycled) insert would receive.
    pub fn next_fresh(&self) -> Handle {
        Handle(self.entries.len() as u64 + 1)
    }

    /// Number of handles waiting to be reused.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (Handle(i as u64 + 1), v)))
    }

    fn index(handle: Handle) -> Option<usize> {
        handle.get().checked_sub(1).and_then(|i| usize::try_from(i).ok())
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Option<T>> {
        let idx = Self::index(handle)?;
        self.entries.get_mut(idx)
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}
