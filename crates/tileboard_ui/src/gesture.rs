//! # Drag Gesture
//!
//! Turns a stream of pointer samples into item selections.
//!
//! ```text
//!            down on item / Start
//!   ┌──────┐ ─────────────────────> ┌───────────────────┐
//!   │ Idle │                        │ Selecting { last }│ ── move onto new item / Next
//!   └──────┘ <───────────────────── └───────────────────┘
//!            up or leave / End
//! ```
//!
//! Hit-testing is supplied by the caller as a closure so it only runs when
//! the current state needs it.

use tileboard_core::ItemId;

use crate::input::PointerKind;

/// Drag session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging; `last` is the most recently selected item.
    Selecting {
        /// Most recently selected item.
        last: ItemId,
    },
}

/// Selection notification produced by a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectEvent {
    /// A drag started on an item.
    Start(ItemId),
    /// The drag entered another item.
    Next(ItemId),
    /// The drag ended.
    End,
}

/// The drag-to-select state machine.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    /// Creates an idle gesture.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Returns true while a drag is in progress.
    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        matches!(self.state, DragState::Selecting { .. })
    }

    /// Returns the most recently selected item.
    #[must_use]
    pub const fn last(&self) -> Option<ItemId> {
        match self.state {
            DragState::Selecting { last } => Some(last),
            DragState::Idle => None,
        }
    }

    /// Pointer pressed over `hit`.
    ///
    /// A press that hits an item (re)starts the session. A press on empty
    /// space leaves the session as it was.
    pub fn pointer_down(&mut self, hit: Option<ItemId>) -> Option<SelectEvent> {
        let hit = hit?;
        self.state = DragState::Selecting { last: hit };
        Some(SelectEvent::Start(hit))
    }

    /// Pointer moved over `hit`.
    pub fn pointer_move(&mut self, hit: Option<ItemId>) -> Option<SelectEvent> {
        let DragState::Selecting { last } = self.state else {
            return None;
        };
        let hit = hit.filter(|&id| id != last)?;
        self.state = DragState::Selecting { last: hit };
        Some(SelectEvent::Next(hit))
    }

    /// Pointer released or left the surface.
    pub fn pointer_up(&mut self) -> Option<SelectEvent> {
        match self.state {
            DragState::Selecting { .. } => {
                self.state = DragState::Idle;
                Some(SelectEvent::End)
            }
            DragState::Idle => None,
        }
    }

    /// Feeds one sample, hit-testing lazily.
    ///
    /// `hit` is only called for samples whose outcome depends on it.
    pub fn handle<H>(&mut self, kind: PointerKind, hit: H) -> Option<SelectEvent>
    where
        H: FnOnce() -> Option<ItemId>,
    {
        match kind {
            PointerKind::Down => self.pointer_down(hit()),
            PointerKind::Move if self.is_selecting() => self.pointer_move(hit()),
            PointerKind::Move => None,
            PointerKind::Up | PointerKind::Leave => self.pointer_up(),
        }
    }
}
