//! Render commands sent from items to the host surface.
//!
//! Items never touch host objects directly. They describe what changed
//! and the [`Surface`](crate::surface::Surface) applies it.

use std::time::Duration;

use crate::animation::Easing;

/// An element property that can be transitioned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    /// Vertical position.
    Top,
    /// Scale transform.
    Transform,
}

/// A change to one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// Position the element's top-left corner.
    Place {
        /// Left offset in pixels.
        x: f32,
        /// Top offset in pixels.
        y: f32,
    },
    /// Offset the element's image inside its box (sprite-sheet frame).
    SpriteOffset {
        /// Horizontal image offset.
        x: f32,
        /// Vertical image offset.
        y: f32,
    },
    /// Animate subsequent changes of `property`.
    Transition {
        /// Property to animate.
        property: TransitionProperty,
        /// Easing curve.
        easing: Easing,
        /// Transition length.
        duration: Duration,
    },
    /// Scale the element about its center.
    Scale {
        /// Horizontal factor.
        x: f32,
        /// Vertical factor.
        y: f32,
    },
}

/// Initial look of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    /// Box width in pixels.
    pub width: f32,
    /// Box height in pixels.
    pub height: f32,
    /// Image shown inside the box.
    pub image: String,
}

/// Look of the whole board surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Background image, tiled once per cell.
    pub background: String,
    /// Background tile width (one cell).
    pub tile_width: f32,
    /// Background tile height (one cell).
    pub tile_height: f32,
    /// Whether the host may start native text selection on drag.
    pub selectable: bool,
}
