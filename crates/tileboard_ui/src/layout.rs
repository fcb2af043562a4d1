//! Board geometry: surface points, rectangles and grid cells.

use crate::config::BoardConfig;
use crate::error::BoardResult;

/// A point in surface coordinates (pixels, origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom exclusive, so adjacent
    /// cells never both claim a point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Scales the rectangle about its center.
    #[must_use]
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        let center = self.center();
        let width = self.width * sx;
        let height = self.height * sy;
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }
}

/// A cell on the board grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    /// Column, 0 is leftmost.
    pub col: u32,
    /// Row, 0 is topmost.
    pub row: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Pixel layout of the board, derived once from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Width of one cell, `floor(width / columns)`.
    pub cell_width: f32,
    /// Height of one cell, `floor(height / rows)`.
    pub cell_height: f32,
}

impl GridGeometry {
    /// Derives the geometry from a board configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`](crate::BoardError::InvalidConfig)
    /// when the grid has no cells or a cell would be narrower than one pixel.
    pub fn from_config(config: &BoardConfig) -> BoardResult<Self> {
        config.validate()?;
        let cell_width = config.width / config.columns;
        let cell_height = config.height / config.rows;

        Ok(Self {
            columns: config.columns,
            rows: config.rows,
            width: config.width as f32,
            height: config.height as f32,
            cell_width: cell_width as f32,
            cell_height: cell_height as f32,
        })
    }

    /// Returns the whole surface rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Returns the top-left corner of a cell.
    #[must_use]
    pub fn cell_origin(&self, pos: GridPos) -> Point {
        Point::new(
            pos.col as f32 * self.cell_width,
            pos.row as f32 * self.cell_height,
        )
    }

    /// Returns the center of a cell.
    #[must_use]
    pub fn cell_center(&self, pos: GridPos) -> Point {
        let origin = self.cell_origin(pos);
        Point::new(
            origin.x + self.cell_width * 0.5,
            origin.y + self.cell_height * 0.5,
        )
    }
}
