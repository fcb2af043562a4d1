//! # Item Registry
//!
//! Bidirectional link between game messages and visual items.
//!
//! Items live in a generational [`SlotPool`]; each entry stores its
//! message, and a `message → ItemId` map gives the reverse direction. The
//! registry is the only owner of items and the only code that mutates
//! either direction, so the two can never disagree.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tileboard_core::{ItemId, SlotPool};

use crate::config::AnimationTiming;
use crate::error::{BoardError, BoardResult};
use crate::item::{ItemFactory, ItemSpec, VisualItem};
use crate::layout::{GridPos, Point};
use crate::surface::Surface;

struct Entry<M> {
    message: M,
    item: Box<dyn VisualItem>,
    departing: bool,
}

/// Owns every live visual item and maps messages to them.
pub struct ItemRegistry<M> {
    items: SlotPool<Entry<M>>,
    by_message: HashMap<M, ItemId>,
    /// Insertion order, for rendering and hit-test tie-breaks.
    order: Vec<ItemId>,
    factory: ItemFactory,
    spec: ItemSpec,
}

impl<M> ItemRegistry<M>
where
    M: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates an empty registry building items with `factory`.
    #[must_use]
    pub fn new(factory: ItemFactory, spec: ItemSpec) -> Self {
        Self {
            items: SlotPool::with_capacity(64),
            by_message: HashMap::with_capacity(64),
            order: Vec::with_capacity(64),
            factory,
            spec,
        }
    }

    /// Builds an item for `message` and attaches it to the surface.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicateMessage`] if the message already has an
    /// item, including one whose removal is still running.
    pub fn add(&mut self, message: M, surface: &mut dyn Surface) -> BoardResult<ItemId> {
        if self.by_message.contains_key(&message) {
            return Err(BoardError::DuplicateMessage(format!("{message:?}")));
        }

        let item = (self.factory)(surface, &self.spec);
        surface.append(item.element());

        let id = self.items.insert(Entry {
            message: message.clone(),
            item,
            departing: false,
        });
        self.by_message.insert(message, id);
        self.order.push(id);

        tracing::debug!(?id, live = self.items.len(), "item added");
        Ok(id)
    }

    /// Starts the removal animation of `message`'s item.
    ///
    /// The item stays registered, rendered and hit-testable until
    /// [`evict`](Self::evict).
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownMessage`] if the message has no item,
    /// [`BoardError::ItemDeparting`] if its removal already started.
    pub fn begin_remove(
        &mut self,
        message: &M,
        surface: &mut dyn Surface,
        timing: &AnimationTiming,
    ) -> BoardResult<(ItemId, Duration)> {
        let (id, entry) = self.lookup_mut(message)?;
        entry.departing = true;
        let duration = entry.item.begin_remove(surface, timing);

        tracing::debug!(?id, duration_ms = duration.as_millis() as u64, "item removal started");
        Ok((id, duration))
    }

    /// Drops the item, both mappings and its element.
    ///
    /// Returns the item's message, or `None` for a stale handle.
    pub fn evict(&mut self, id: ItemId, surface: &mut dyn Surface) -> Option<M> {
        let entry = self.items.remove(id)?;
        self.by_message.remove(&entry.message);
        self.order.retain(|&live| live != id);
        surface.detach(entry.item.element());

        tracing::debug!(?id, live = self.items.len(), "item evicted");
        Some(entry.message)
    }

    /// Starts moving `message`'s item to `target`.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownMessage`] if the message has no item,
    /// [`BoardError::ItemDeparting`] if the item is being removed.
    pub fn begin_move(
        &mut self,
        message: &M,
        target: GridPos,
        surface: &mut dyn Surface,
        timing: &AnimationTiming,
    ) -> BoardResult<(ItemId, Duration)> {
        let (id, entry) = self.lookup_mut(message)?;
        let duration = entry.item.begin_move(target, surface, timing);

        tracing::trace!(
            ?id,
            col = target.col,
            row = target.row,
            duration_ms = duration.as_millis() as u64,
            "item move started"
        );
        Ok((id, duration))
    }

    /// Applies a completed move. Returns false if the item is gone.
    pub fn settle(&mut self, id: ItemId, position: GridPos) -> bool {
        match self.items.get_mut(id) {
            Some(entry) => {
                entry.item.settle(position);
                true
            }
            None => {
                tracing::debug!(?id, "move completed after eviction; ignored");
                false
            }
        }
    }

    /// Returns the item under `point`, if any.
    #[must_use]
    pub fn find_at(&self, surface: &dyn Surface, point: Point) -> Option<ItemId> {
        let element = surface.element_at(point)?;
        self.order.iter().copied().find(|&id| {
            self.items
                .get(id)
                .is_some_and(|entry| entry.item.find(element))
        })
    }

    /// Visits every live item in insertion order.
    pub fn for_each_live<F>(&self, mut f: F)
    where
        F: FnMut(ItemId, &M, &dyn VisualItem),
    {
        for &id in &self.order {
            if let Some(entry) = self.items.get(id) {
                f(id, &entry.message, entry.item.as_ref());
            }
        }
    }

    /// Visits every live item in insertion order, mutably.
    pub fn for_each_live_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(ItemId, &M, &mut dyn VisualItem),
    {
        for &id in &self.order {
            if let Some(entry) = self.items.get_mut(id) {
                f(id, &entry.message, entry.item.as_mut());
            }
        }
    }

    /// Returns the item id of `message`.
    #[must_use]
    pub fn item_id(&self, message: &M) -> Option<ItemId> {
        self.by_message.get(message).copied()
    }

    /// Returns the message of an item.
    #[must_use]
    pub fn message(&self, id: ItemId) -> Option<&M> {
        self.items.get(id).map(|entry| &entry.message)
    }

    /// Returns an item.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&dyn VisualItem> {
        self.items.get(id).map(|entry| entry.item.as_ref())
    }

    /// Returns the number of live items, departing ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no item is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if `message` has an item.
    #[must_use]
    pub fn contains(&self, message: &M) -> bool {
        self.by_message.contains_key(message)
    }

    /// Returns true if the item's removal has started.
    #[must_use]
    pub fn is_departing(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|entry| entry.departing)
    }

    fn lookup_mut(&mut self, message: &M) -> BoardResult<(ItemId, &mut Entry<M>)> {
        let id = self
            .by_message
            .get(message)
            .copied()
            .ok_or_else(|| BoardError::UnknownMessage(format!("{message:?}")))?;
        let entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| BoardError::UnknownMessage(format!("{message:?}")))?;
        if entry.departing {
            return Err(BoardError::ItemDeparting(format!("{message:?}")));
        }
        Ok((id, entry))
    }
}

impl<M: fmt::Debug> fmt::Debug for ItemRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("live", &self.items.len())
            .field("messages", &self.by_message.keys().collect::<Vec<_>>())
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
