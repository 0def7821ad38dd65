//! A bounded, ordered bump allocator that hands out typed handles.
//!
//! Every document owns its own arenas: one for generic nodes and one for raw
//! strings, and in construction mode one more pair for the typed output tree.
//! An [`Arena`] enforces both an object cap and a byte cap, where the byte cost
//! of each slot includes the padding needed to honor its alignment. Handles
//! carry the identity of the arena that issued them, so membership is a
//! constant-time check rather than a search.

use crate::error::{AllocError, RollbackError};
use crate::util::next_id;

use std::fmt;
use std::marker::PhantomData;

#[cfg(test)]
mod tests;

/// Per-slot hook, called with the slot's value and its 0-based index.
pub type SlotHook<T> = Box<dyn FnMut(&mut T, usize)>;

/// Configured capacity of an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_objects: usize,
    pub max_bytes: usize,
}

impl Limits {
    /// Default limits for arenas of nodes.
    pub const NODE: Limits = Limits { max_objects: 8192, max_bytes: 131_072 };
    /// Default limits for arenas of raw strings and element arrays.
    pub const RAW: Limits = Limits { max_objects: 4096, max_bytes: 65_536 };
}

/// Tags the handles of one arena, unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(u32);

impl ArenaId {
    fn next() -> Self {
        ArenaId(next_id())
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reference to one slot of one specific [`Arena`].
pub struct Handle<T> {
    index: u32,
    arena: ArenaId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn arena(self) -> ArenaId {
        self.arena
    }
}

// Derives would demand `T: Clone` and friends, which handles do not need.

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.arena == other.arena
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.arena.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.arena)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

pub struct Arena<T> {
    name: &'static str,
    id: ArenaId,
    limits: Limits,
    slots: Vec<T>,
    /// The byte counter before each slot was placed, so rollback can restore it.
    starts: Vec<usize>,
    used_bytes: usize,
    init: Option<SlotHook<T>>,
    finalizer: Option<SlotHook<T>>,
}

impl<T> Arena<T> {
    pub fn new(name: &'static str, limits: Limits) -> Self {
        Arena {
            name,
            id: ArenaId::next(),
            limits,
            slots: Vec::new(),
            starts: Vec::new(),
            used_bytes: 0,
            init: None,
            finalizer: None,
        }
    }

    /// Registers a hook that runs on every newly allocated slot.
    #[must_use]
    pub fn with_init(mut self, hook: impl FnMut(&mut T, usize) + 'static) -> Self {
        self.init = Some(Box::new(hook));
        self
    }

    /// Registers a hook that runs on every live slot, newest first, when the
    /// arena is dropped.
    #[must_use]
    pub fn with_finalizer(mut self, hook: impl FnMut(&mut T, usize) + 'static) -> Self {
        self.finalizer = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> ArenaId {
        self.id
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Allocates a slot for `value`, charging the size and alignment of `T`.
    pub fn allocate(&mut self, value: T) -> Result<Handle<T>, AllocError> {
        self.allocate_sized(value, std::mem::size_of::<T>(), std::mem::align_of::<T>())
    }

    /// Allocates a slot for `value`, charging `size` bytes placed at `align`.
    ///
    /// A size of zero is charged as one byte, so every slot has a distinct
    /// position. Fails without side effects when either cap would be exceeded.
    pub fn allocate_sized(&mut self, mut value: T, size: usize, align: usize) -> Result<Handle<T>, AllocError> {
        let size = size.max(1);
        let name = self.name;
        let layout_error = move || AllocError::Layout { name, size, align };

        if !align.is_power_of_two() {
            return Err(layout_error());
        }
        let start = self.used_bytes.checked_add(align - 1).ok_or_else(layout_error)? & !(align - 1);
        let end = start.checked_add(size).ok_or_else(layout_error)?;

        if self.slots.len() >= self.limits.max_objects {
            return Err(AllocError::Objects {
                name: self.name,
                max_objects: self.limits.max_objects,
                max_bytes: self.limits.max_bytes,
            });
        }
        if end > self.limits.max_bytes {
            return Err(AllocError::Bytes {
                name: self.name,
                max_objects: self.limits.max_objects,
                max_bytes: self.limits.max_bytes,
            });
        }

        let index = self.slots.len();
        let index_tag = u32::try_from(index).map_err(|_| layout_error())?;

        if let Some(init) = &mut self.init {
            init(&mut value, index);
        }

        self.starts.push(self.used_bytes);
        self.slots.push(value);
        self.used_bytes = end;

        tracing::trace!(arena = self.name, index, size, align, "allocated slot");

        Ok(Handle { index: index_tag, arena: self.id, _marker: PhantomData })
    }

    /// Undoes the most recent allocation, returning its value. The next
    /// allocation of the same size lands in the same slot.
    pub fn rollback(&mut self, handle: Handle<T>) -> Result<T, RollbackError> {
        if self.slots.is_empty() {
            return Err(RollbackError::Empty { name: self.name });
        }
        if handle.arena != self.id || handle.index() + 1 != self.slots.len() {
            return Err(RollbackError::NotLast { name: self.name });
        }

        self.used_bytes = self.starts.pop().unwrap_or(0);
        let value = self.slots.pop().ok_or(RollbackError::Empty { name: self.name })?;

        tracing::trace!(arena = self.name, index = handle.index(), "rolled back slot");

        Ok(value)
    }

    /// Returns true if and only if `handle` was issued by this arena and its slot
    /// is still live.
    pub fn contains(&self, handle: Handle<T>) -> bool {
        handle.arena == self.id && handle.index() < self.slots.len()
    }

    /// Returns the slot index of `handle`, should it belong to this arena.
    pub fn find(&self, handle: Handle<T>) -> Option<usize> {
        self.contains(handle).then(|| handle.index())
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if self.contains(handle) {
            self.slots.get(handle.index())
        } else {
            None
        }
    }

    /// Live slots with their handles, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        let arena = self.id;
        self.slots
            .iter()
            .enumerate()
            .map(move |(index, value)| (Handle { index: index as u32, arena, _marker: PhantomData }, value))
    }
}

impl<T> Drop for Arena<T> {
    fn drop(&mut self) {
        if let Some(finalizer) = &mut self.finalizer {
            for (index, value) in self.slots.iter_mut().enumerate().rev() {
                finalizer(value, index);
            }
        }
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("len", &self.slots.len())
            .field("used_bytes", &self.used_bytes)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
