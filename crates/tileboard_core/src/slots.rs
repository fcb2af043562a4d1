//! # Slot Pool
//!
//! Generational slot storage for objects that are frequently created and
//! evicted (tiles come and go every match).

use crate::handle::ItemId;

/// One storage slot. The generation is bumped every time the slot is freed.
#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A growable pool of generationally-addressed values.
///
/// Freed slots are recycled, but every recycle bumps the slot generation,
/// so an [`ItemId`] obtained before a removal never resolves to the value
/// that later reuses its slot.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is owned by a single frame loop.
///
/// # Example
///
/// ```rust
/// use tileboard_core::SlotPool;
///
/// let mut pool: SlotPool<&str> = SlotPool::with_capacity(4);
/// let a = pool.insert("a");
/// assert_eq!(pool.remove(a), Some("a"));
///
/// let b = pool.insert("b");
/// assert_eq!(a.index(), b.index()); // slot reused
/// assert!(pool.get(a).is_none()); // stale handle
/// ```
#[derive(Debug)]
pub struct SlotPool<T> {
    /// The storage array.
    slots: Vec<Slot<T>>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> SlotPool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` values before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores a value and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX - 1` slots would be needed.
    pub fn insert(&mut self, value: T) -> ItemId {
        self.len += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return ItemId::new(index, slot.generation);
        }

        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&i| i < u32::MAX)
            .expect("slot pool exhausted the 32-bit index space");
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ItemId::new(index, 0)
    }

    /// Removes a value, returning it if the handle was live.
    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        let slot = self.slot_mut(id)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index());
        self.len -= 1;
        Some(value)
    }

    /// Returns true if the handle refers to a live value.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Gets a reference to a live value.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&T> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Gets a mutable reference to a live value.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.slot_mut(id)?.value.as_mut()
    }

    fn slot_mut(&mut self, id: ItemId) -> Option<&mut Slot<T>> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        (slot.generation == id.generation()).then_some(slot)
    }
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
