//! # TILEBOARD UI System
//!
//! The visual and gestural substrate of a tile board:
//! - Tiles are added, removed and moved with animations
//! - Pointer drags become `select_start` / `select_next` / `select_end`
//! - Every frame pulls displayable state from the game logic and repaints
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      SECTION RENDERER                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  game state ──> ItemRegistry ──> FrameScheduler ──> render    │
//! │                     ↑                                 │       │
//! │  pointer ──> DragGesture ──(hit-test)──> GameLogic <──┘ info  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Philosophy
//!
//! This is NOT an animation framework. It sequences the handful of
//! animations a tile game needs and tells the game what the player
//! dragged over. What a selection means is the game's business.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod error;
pub mod game;
pub mod gesture;
pub mod input;
pub mod item;
pub mod layout;
pub mod registry;
pub mod render;
pub mod section;
pub mod surface;

pub use animation::{Animation, Easing};
pub use config::{AnimationTiming, BoardConfig};
pub use error::{BoardError, BoardResult};
pub use game::GameLogic;
pub use gesture::{DragGesture, DragState, SelectEvent};
pub use input::{PointerEvent, PointerKind};
pub use item::{tile_factory, ItemFactory, ItemInfo, ItemSpec, TileItem, VisualItem};
pub use layout::{GridGeometry, GridPos, Point, Rect};
pub use registry::ItemRegistry;
pub use render::{ElementStyle, RenderCommand, SurfaceStyle, TransitionProperty};
pub use section::{Activation, SectionRenderer, Stage};
pub use surface::{ElementId, ElementSnapshot, HeadlessSurface, Surface};

pub use tileboard_core::{Completion, ItemId, TickReport};
