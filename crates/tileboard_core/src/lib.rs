//! # TILEBOARD Core Kernel
//!
//! Host-agnostic building blocks for a frame-driven tile board:
//! - Generational handles that never resolve once their item is gone
//! - Slot storage with O(1) insert and remove
//! - A frame scheduler that sequences animations without timers or threads
//!
//! ## Frame Model
//!
//! ```text
//! host refresh ──> FrameScheduler::tick(now)
//!                    ├─ advance logical clock (monotonic)
//!                    ├─ fire every task with deadline <= now
//!                    └─ run the render pass exactly once
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tileboard_core::FrameScheduler;
//!
//! let mut scheduler: FrameScheduler<Vec<u32>> = FrameScheduler::new();
//! let mut log = Vec::new();
//!
//! scheduler.delay(Duration::from_millis(100), |log, _| {
//!     log.push(7);
//!     Ok(())
//! });
//!
//! scheduler.tick(Duration::from_millis(50), &mut log, |_, _| {});
//! assert!(log.is_empty());
//! scheduler.tick(Duration::from_millis(100), &mut log, |_, _| {});
//! assert_eq!(log, [7]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod completion;
pub mod error;
pub mod handle;
pub mod scheduler;
pub mod slots;

pub use completion::Completion;
pub use error::{TaskError, TaskResult};
pub use handle::ItemId;
pub use scheduler::{FrameScheduler, SchedulerStats, TickReport};
pub use slots::SlotPool;
