//! Grid and editor configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of chunks per axis.
pub const MAX_GRID_SIZE: u32 = 10;

/// Largest number of cells per chunk per axis.
pub const MAX_CHUNK_SIZE: u32 = 32;

/// Smallest cell size (in pixels) that still renders legibly.
pub const MIN_CELL_SIZE: u32 = 5;

/// Largest cell size in pixels.
pub const MAX_CELL_SIZE: u32 = 50;

/// Largest brush edge length offered by the tool settings.
pub const MAX_BRUSH_SIZE: u32 = 10;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Grid size must be between 1 and {MAX_GRID_SIZE} chunks, got {0}")]
    GridSize(u32),
    #[error("Chunk size must be between 1 and {MAX_CHUNK_SIZE} cells, got {0}")]
    ChunkSize(u32),
    #[error("Cell size must be between {MIN_CELL_SIZE}px and {MAX_CELL_SIZE}px, got {0}")]
    CellSize(u32),
    #[error("Brush size must be between 1 and {MAX_BRUSH_SIZE}, got {0}")]
    BrushSize(u32),
}

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Shape of the chunked grid.
///
/// The grid is `grid_size × grid_size` chunks, each chunk holds
/// `chunk_size × chunk_size` cells, and each cell is drawn `cell_size`
/// pixels wide in unzoomed grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    /// Chunks per axis.
    pub grid_size: u32,
    /// Cells per chunk per axis.
    pub chunk_size: u32,
    /// Pixels per cell.
    pub cell_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            chunk_size: 8,
            cell_size: 30,
        }
    }
}

impl GridConfig {
    /// Create a config, rejecting values outside the supported ranges.
    pub fn new(grid_size: u32, chunk_size: u32, cell_size: u32) -> ConfigResult<Self> {
        let config = Self {
            grid_size,
            chunk_size,
            cell_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants on every field.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(1..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(ConfigError::ChunkSize(self.chunk_size));
        }
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        Ok(())
    }

    /// Total addressable cells per axis.
    pub fn extent(&self) -> i32 {
        (self.grid_size * self.chunk_size) as i32
    }

    /// Total grid size per axis, in pixels.
    pub fn pixel_extent(&self) -> f64 {
        self.extent() as f64 * self.cell_size as f64
    }

    /// Total number of chunks.
    pub fn chunk_count(&self) -> usize {
        (self.grid_size * self.grid_size) as usize
    }
}

/// Check a brush size against the allowed range.
pub fn validate_brush_size(size: u32) -> ConfigResult<u32> {
    if (1..=MAX_BRUSH_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ConfigError::BrushSize(size))
    }
}

/// Editor-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Initial grid shape.
    #[serde(default)]
    pub grid: GridConfig,
    /// Maximum number of undo entries kept (None = unbounded).
    #[serde(default)]
    pub history_limit: Option<usize>,
    /// Fill in cells between pointer samples while dragging a voxel brush.
    #[serde(default = "default_interpolate")]
    pub interpolate_strokes: bool,
}

fn default_interpolate() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            history_limit: None,
            interpolate_strokes: true,
        }
    }
}
