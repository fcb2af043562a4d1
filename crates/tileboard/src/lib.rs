//! # TILEBOARD
//!
//! A chain-matching tile board built from the two lower crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            TILEBOARD                              │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  ┌─────────────────┐   select_*   ┌──────────────────────────┐   │
//! │  │  tileboard_ui   │─────────────>│        ChainGame         │   │
//! │  │                 │<─────────────│                          │   │
//! │  │ • SectionRender │    info()    │ • grid truth             │   │
//! │  │ • ItemRegistry  │              │ • chain rules            │   │
//! │  │ • DragGesture   │              └────────────┬─────────────┘   │
//! │  └────────▲────────┘                           │                 │
//! │           │          ┌─────────────┐           │                 │
//! │           └──────────│ CommandBus  │<──────────┘                 │
//! │       BoardDriver    └─────────────┘  Add / Remove / MoveTo      │
//! │                                                                  │
//! │  ┌─────────────────┐                                             │
//! │  │ tileboard_core  │  ItemId • SlotPool • FrameScheduler         │
//! │  └─────────────────┘                                             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `bus`: Game → board command channel
//! - `chain`: The demo chain-matching game
//! - `driver`: Per-frame orchestration

pub mod bus;
pub mod chain;
pub mod driver;

// Re-export the layers
pub use tileboard_core as core;
pub use tileboard_ui as ui;

// Re-export commonly used types
pub use bus::{apply_commands, ApplyReport, BoardCommand, CommandBus, CommandReceiver, CommandSender};
pub use chain::{ChainGame, ChainStats, Tile, MIN_CHAIN};
pub use driver::{BoardDriver, FrameSummary, TARGET_FRAME_TIME};
