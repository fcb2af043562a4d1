//! # Board Command Bus
//!
//! The game reacts to selections while the board is borrowed (it is the
//! board that calls `select_end`). It cannot mutate the board from there,
//! so it sends commands instead and the driver applies them next frame.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │    Game     │─────>│   Command   │─────>│   Section   │
//! │   (Logic)   │      │   Channel   │      │  Renderer   │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```

use std::fmt;
use std::hash::Hash;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tileboard_core::Completion;
use tileboard_ui::{SectionRenderer, Surface};

/// A change the game wants on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardCommand<M> {
    /// Create an item for a new message.
    Add(M),
    /// Animate the item out and drop it.
    Remove(M),
    /// Animate the item to a new cell.
    MoveTo {
        /// Message whose item moves.
        message: M,
        /// Target column.
        col: u32,
        /// Target row.
        row: u32,
    },
}

/// An unbounded command channel.
///
/// Every command mirrors a change the game already made to its own state,
/// so none may be dropped. A burst is at most a few commands per cell.
pub struct CommandBus<M> {
    sender: Sender<BoardCommand<M>>,
    receiver: Receiver<BoardCommand<M>>,
}

impl<M> CommandBus<M> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Returns a sending half.
    #[must_use]
    pub fn sender(&self) -> CommandSender<M> {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    /// Returns a receiving half.
    #[must_use]
    pub fn receiver(&self) -> CommandReceiver<M> {
        CommandReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn create_pair() -> (CommandSender<M>, CommandReceiver<M>) {
        let bus = Self::new();
        (bus.sender(), bus.receiver())
    }
}

/// Sending half of a [`CommandBus`].
pub struct CommandSender<M> {
    sender: Sender<BoardCommand<M>>,
}

impl<M> Clone for CommandSender<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M> CommandSender<M> {
    /// Queues a command. Never blocks.
    ///
    /// Returns false only if the receiving board is gone.
    #[inline]
    pub fn send(&self, command: BoardCommand<M>) -> bool {
        self.sender.send(command).is_ok()
    }
}

impl<M> Default for CommandBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for CommandSender<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSender")
            .field("queued", &self.sender.len())
            .finish()
    }
}

/// Receiving half of a [`CommandBus`].
pub struct CommandReceiver<M> {
    receiver: Receiver<BoardCommand<M>>,
}

impl<M> CommandReceiver<M> {
    /// Takes every queued command.
    #[inline]
    pub fn drain(&self) -> Vec<BoardCommand<M>> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of queued commands.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

}

impl<M> fmt::Debug for CommandReceiver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandReceiver")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

/// Outcome of [`apply_commands`].
#[derive(Debug)]
pub struct ApplyReport<M> {
    /// Commands the board accepted.
    pub applied: u32,
    /// Commands the board rejected (logged).
    pub rejected: u32,
    /// Started removals and their completions.
    pub removals: Vec<(M, Completion)>,
}

impl<M> Default for ApplyReport<M> {
    fn default() -> Self {
        Self {
            applied: 0,
            rejected: 0,
            removals: Vec::new(),
        }
    }
}

/// Applies every queued command to `section`, in send order.
///
/// A rejected command is logged and skipped; the rest still apply.
pub fn apply_commands<M, S>(
    section: &mut SectionRenderer<M, S>,
    receiver: &CommandReceiver<M>,
) -> ApplyReport<M>
where
    M: Clone + Eq + Hash + fmt::Debug + 'static,
    S: Surface + 'static,
{
    let mut report = ApplyReport::default();

    for command in receiver.drain() {
        let result = match &command {
            BoardCommand::Add(message) => section.add(message.clone()).map(drop),
            BoardCommand::Remove(message) => section
                .remove(message)
                .map(|done| report.removals.push((message.clone(), done))),
            BoardCommand::MoveTo { message, col, row } => {
                section.move_to(message, *col, *row).map(drop)
            }
        };

        match result {
            Ok(()) => report.applied += 1,
            Err(error) => {
                report.rejected += 1;
                tracing::warn!(?command, %error, "board command rejected");
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (sender, receiver) = CommandBus::create_pair();
        assert!(sender.send(BoardCommand::Add(1)));
        assert!(sender.send(BoardCommand::Remove(1)));
        assert_eq!(receiver.pending_count(), 2);

        assert_eq!(
            receiver.drain(),
            [BoardCommand::Add(1), BoardCommand::Remove(1)]
        );
        assert_eq!(receiver.pending_count(), 0);
    }

    #[test]
    fn test_large_burst_is_kept() {
        let (sender, receiver) = CommandBus::create_pair();
        for message in 0..10_000 {
            assert!(sender.send(BoardCommand::Add(message)));
        }
        assert_eq!(receiver.drain().len(), 10_000);
    }

    #[test]
    fn test_send_fails_once_board_is_gone() {
        let (sender, receiver) = CommandBus::create_pair();
        drop(receiver);
        assert!(!sender.send(BoardCommand::Add(1)));
    }
}
