//! VoxDraft Core Library
//!
//! Platform-agnostic data structures and logic for the VoxDraft voxel grid
//! editor: chunked cell storage, annotations, brush geometry and a shared
//! undo/redo history.

pub mod action;
pub mod annotation;
pub mod bridge;
pub mod camera;
pub mod color;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod grid;
pub mod history;
pub mod input;
pub mod tools;

pub use action::{Action, ActionDomain, ActionKind};
pub use annotation::{Annotation, AnnotationId, AnnotationKind, AnnotationStore};
pub use bridge::{ActionBus, ActionListener};
pub use camera::Camera;
pub use color::{CellColor, ColorParseError, PALETTE};
pub use config::{
    ConfigError, ConfigResult, EditorConfig, GridConfig, MAX_BRUSH_SIZE, MAX_CELL_SIZE, MAX_CHUNK_SIZE,
    MAX_GRID_SIZE, MIN_CELL_SIZE,
};
pub use editor::Editor;
pub use geometry::{brush_footprint, screen_to_cell, CellAddress, GridPos};
pub use grid::{BatchOperation, Cell, Chunk, GridData, GridStore};
pub use history::{ActionHistory, Direction};
pub use input::{resolve_shortcut, EditorCommand, KeyChord, Modifiers, MouseButton, PointerEvent};
pub use tools::{ToolKind, ToolManager};
