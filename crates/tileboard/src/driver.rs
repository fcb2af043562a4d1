//! # Board Driver
//!
//! One host refresh:
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. APPLY COMMANDS  (queued by the game since last frame)    │
//! │ 2. TICK            (due completions, then render pass)      │
//! │ 3. REAP            (removals whose completion resolved)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tileboard_core::{Completion, TickReport};
use tileboard_ui::{GameLogic, PointerEvent, SectionRenderer, SelectEvent, Surface};

use crate::bus::{apply_commands, CommandReceiver};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// What happened during one [`BoardDriver::frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSummary<M> {
    /// Scheduler outcome.
    pub tick: TickReport,
    /// Commands applied before the tick.
    pub applied: u32,
    /// Commands rejected before the tick.
    pub rejected: u32,
    /// Messages whose items were evicted this frame.
    pub retired: Vec<M>,
}

/// Couples a section renderer to the game's command channel.
pub struct BoardDriver<M, S> {
    section: SectionRenderer<M, S>,
    commands: CommandReceiver<M>,
    departing: Vec<(M, Completion)>,
}

impl<M, S> BoardDriver<M, S>
where
    M: Clone + Eq + Hash + fmt::Debug + 'static,
    S: Surface + 'static,
{
    /// Creates a driver.
    #[must_use]
    pub fn new(section: SectionRenderer<M, S>, commands: CommandReceiver<M>) -> Self {
        Self {
            section,
            commands,
            departing: Vec::new(),
        }
    }

    /// Forwards a pointer sample to the section.
    pub fn pointer<G>(&mut self, event: PointerEvent, game: &mut G) -> Option<SelectEvent>
    where
        G: GameLogic<M>,
    {
        self.section.pointer(event, game)
    }

    /// Runs one host refresh.
    pub fn frame<G>(&mut self, now: Duration, game: &G) -> FrameSummary<M>
    where
        G: GameLogic<M>,
    {
        let applied = apply_commands(&mut self.section, &self.commands);
        self.departing.extend(applied.removals);

        let tick = self.section.tick(now, game);

        let mut retired = Vec::new();
        self.departing.retain(|(message, done)| {
            if done.is_resolved() {
                retired.push(message.clone());
                false
            } else {
                true
            }
        });

        FrameSummary {
            tick,
            applied: applied.applied,
            rejected: applied.rejected,
            retired,
        }
    }

    /// Returns the number of removals still animating.
    #[must_use]
    pub fn departing(&self) -> usize {
        self.departing.len()
    }

    /// Returns the section.
    #[must_use]
    pub fn section(&self) -> &SectionRenderer<M, S> {
        &self.section
    }

    /// Returns the section mutably.
    pub fn section_mut(&mut self) -> &mut SectionRenderer<M, S> {
        &mut self.section
    }
}

impl<M: fmt::Debug, S> fmt::Debug for BoardDriver<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardDriver")
            .field("section", &self.section)
            .field("commands", &self.commands)
            .field("departing", &self.departing.len())
            .finish()
    }
}
