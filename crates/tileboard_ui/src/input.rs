//! Pointer input delivered by the host.
//!
//! Hosts translate their native mouse/touch events into [`PointerEvent`]s
//! with surface-relative coordinates.

use crate::layout::Point;

/// Phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed over the surface.
    Down,
    /// Pointer moved over the surface.
    Move,
    /// Button released.
    Up,
    /// Pointer left the surface.
    Leave,
}

/// One raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Phase of the sample.
    pub kind: PointerKind,
    /// Position in surface coordinates.
    pub position: Point,
}

impl PointerEvent {
    /// Creates a pointer sample.
    #[must_use]
    pub const fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }

    /// Button pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    /// Button released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    /// Pointer left the surface at `(x, y)`.
    #[must_use]
    pub const fn leave(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Leave, x, y)
    }
}

