//! # Item Handles
//!
//! Items are addressed by lightweight identifiers consisting of:
//! - An index into slot storage
//! - A generation counter, bumped every time the slot is freed

use std::fmt;

/// Unique identifier for a live item.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index into slot storage
/// - Upper 32 bits: Generation counter for detecting stale references
///
/// A handle taken before its item was evicted never resolves again, even
/// after the slot is reused by a newer item.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Null/invalid item ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Creates a new item ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the item ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the item ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Checks if this item ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("ItemId(null)")
        } else {
            write!(f, "ItemId({}v{})", self.index(), self.generation())
        }
    }
}
