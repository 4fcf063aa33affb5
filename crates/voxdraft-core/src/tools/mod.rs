//! Tool system for the grid editor.

use crate::color::CellColor;
use crate::config::{validate_brush_size, ConfigResult};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    VoxelPlace,
    Eraser,
    Line,
    Rectangle,
    FreeDraw,
    Pan,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::VoxelPlace,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::FreeDraw,
        ToolKind::Pan,
    ];

    /// Tools that edit grid cells.
    pub fn is_voxel(self) -> bool {
        matches!(self, ToolKind::VoxelPlace | ToolKind::Eraser)
    }

    /// Tools that draw annotations.
    pub fn is_annotation(self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Rectangle | ToolKind::FreeDraw)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::VoxelPlace => "Place",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::FreeDraw => "Free Draw",
            ToolKind::Pan => "Pan",
        }
    }
}

/// Manages the current tool and the drawing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Color for new cells and annotations.
    pub color: CellColor,
    /// Brush edge length in cells; doubles as annotation thickness.
    brush_size: u32,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            color: CellColor::default(),
            brush_size: 1,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    pub fn set_color(&mut self, color: CellColor) {
        self.color = color;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Set the brush size; out-of-range sizes are rejected and leave it unchanged.
    pub fn set_brush_size(&mut self, size: u32) -> ConfigResult<()> {
        self.brush_size = validate_brush_size(size)?;
        Ok(())
    }

    /// Stroke width for annotations drawn with the current settings.
    pub fn thickness(&self) -> f64 {
        self.brush_size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;
    use crate::config::ConfigError;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::VoxelPlace);

        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(tm.current_tool, ToolKind::Rectangle);
    }

    #[test]
    fn test_defaults() {
        let tm = ToolManager::new();
        assert_eq!(tm.color, PALETTE[0]);
        assert_eq!(tm.brush_size(), 1);
        assert!((tm.thickness() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tool_categories() {
        let voxel: Vec<_> = ToolKind::ALL.iter().filter(|t| t.is_voxel()).collect();
        let annotation: Vec<_> = ToolKind::ALL.iter().filter(|t| t.is_annotation()).collect();
        assert_eq!(voxel.len(), 2);
        assert_eq!(annotation.len(), 3);
        assert!(!ToolKind::Pan.is_voxel());
        assert!(!ToolKind::Pan.is_annotation());
    }

    #[test]
    fn test_brush_size_validation() {
        let mut tm = ToolManager::new();
        assert!(tm.set_brush_size(4).is_ok());
        assert_eq!(tm.brush_size(), 4);

        assert_eq!(tm.set_brush_size(0), Err(ConfigError::BrushSize(0)));
        assert_eq!(tm.set_brush_size(42), Err(ConfigError::BrushSize(42)));
        assert_eq!(tm.brush_size(), 4);
    }
}
