//! The game-logic collaborator.

use crate::item::ItemInfo;

/// What the board needs from the game.
///
/// `M` is the game's opaque per-entity message token. The board never
/// looks inside it.
pub trait GameLogic<M> {
    /// A drag started on the item of `message`.
    fn select_start(&mut self, message: &M);

    /// The drag entered the item of `message`.
    fn select_next(&mut self, message: &M);

    /// The drag ended.
    fn select_end(&mut self);

    /// Current displayable state of the item of `message`.
    fn info(&self, message: &M) -> ItemInfo;
}
