//! # Board Configuration
//!
//! Loaded once at startup, usually from a TOML file:
//!
//! ```toml
//! background = "bg.png"
//! item_image = "block.png"
//! width = 400
//! height = 400
//! columns = 8
//! rows = 8
//!
//! [timing]
//! remove_ms = 350
//! move_ms_per_cell = 100
//! max_move_ms = 1000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Animation lengths used by tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    /// Scale-out length of a removal.
    pub remove_ms: u64,
    /// Fall time per cell of vertical travel.
    pub move_ms_per_cell: u64,
    /// Upper bound for any single move.
    pub max_move_ms: u64,
}

impl AnimationTiming {
    /// Length of a removal animation.
    #[inline]
    #[must_use]
    pub const fn remove_duration(&self) -> Duration {
        Duration::from_millis(self.remove_ms)
    }

    /// Length of a move covering `cells` rows.
    ///
    /// Never negative and never above `max_move_ms`. Non-finite input
    /// yields zero.
    #[must_use]
    pub fn move_duration(&self, cells: f32) -> Duration {
        if !cells.is_finite() {
            return Duration::ZERO;
        }
        let ms = (cells.abs() * self.move_ms_per_cell as f32).min(self.max_move_ms as f32);
        Duration::from_millis(ms.max(0.0).round() as u64)
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            remove_ms: 350,
            move_ms_per_cell: 100,
            max_move_ms: 1000,
        }
    }
}

/// Everything needed to build a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Background image, tiled once per cell.
    pub background: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Sprite sheet shared by all tiles.
    pub item_image: String,
    /// Animation lengths.
    #[serde(default)]
    pub timing: AnimationTiming,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            background: "bg.png".into(),
            width: 400,
            height: 400,
            columns: 8,
            rows: 8,
            item_image: "block.png".into(),
            timing: AnimationTiming::default(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ConfigParse`] on malformed TOML and
    /// [`BoardError::InvalidConfig`] when validation fails.
    pub fn from_toml_str(source: &str) -> BoardResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ConfigRead`] when the file cannot be read,
    /// otherwise the same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| BoardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading board configuration");
        Self::from_toml_str(&source)
    }

    /// Checks that the grid is usable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] when the grid has no cells or
    /// a cell would be smaller than one pixel.
    pub fn validate(&self) -> BoardResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(BoardError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.width / self.columns == 0 || self.height / self.rows == 0 {
            return Err(BoardError::InvalidConfig(format!(
                "{}x{} px cannot hold {}x{} cells",
                self.width, self.height, self.columns, self.rows
            )));
        }
        Ok(())
    }
}
