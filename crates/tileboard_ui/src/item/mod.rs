//! Visual items: the on-screen half of a registered message.
//!
//! The board is generic over how an item looks. It only needs the
//! [`VisualItem`] contract and an [`ItemFactory`] to build items on `add`.

mod tile;

pub use tile::{tile_factory, TileItem};

use std::time::Duration;

use crate::config::AnimationTiming;
use crate::layout::GridPos;
use crate::surface::{ElementId, Surface};

/// Displayable state of one item, pulled from the game every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemInfo {
    /// Cell the item should be drawn in.
    pub position: GridPos,
    /// Visual type code (sprite-sheet column).
    pub kind: u32,
    /// Whether the item is part of the current selection.
    pub selected: bool,
}

impl ItemInfo {
    /// Creates item info.
    #[must_use]
    pub const fn new(col: u32, row: u32, kind: u32, selected: bool) -> Self {
        Self {
            position: GridPos::new(col, row),
            kind,
            selected,
        }
    }
}

/// Construction parameters handed to the item factory.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    /// Width of one cell.
    pub cell_width: f32,
    /// Height of one cell.
    pub cell_height: f32,
    /// Sprite sheet shared by all items.
    pub image: String,
}

/// One rendered, hit-testable tile.
pub trait VisualItem {
    /// Returns the element the item draws into.
    fn element(&self) -> ElementId;

    /// Returns true if `element` belongs to this item.
    fn find(&self, element: ElementId) -> bool {
        self.element() == element
    }

    /// Returns the logical cell, unset until the first completed move.
    fn geometry(&self) -> Option<GridPos>;

    /// Starts the removal animation and returns its length.
    fn begin_remove(&mut self, surface: &mut dyn Surface, timing: &AnimationTiming) -> Duration;

    /// Starts moving toward `target` and returns the animation length.
    ///
    /// The logical geometry is untouched until [`settle`](Self::settle).
    fn begin_move(
        &mut self,
        target: GridPos,
        surface: &mut dyn Surface,
        timing: &AnimationTiming,
    ) -> Duration;

    /// Applies a completed move.
    fn settle(&mut self, position: GridPos);

    /// Paints the item from the game's current state.
    fn render(&mut self, info: &ItemInfo, surface: &mut dyn Surface);
}

/// Builds a visual item for a newly added message.
pub type ItemFactory = Box<dyn FnMut(&mut dyn Surface, &ItemSpec) -> Box<dyn VisualItem>>;
