//! Gesture scripts and session summaries.
//!
//! A script is a JSON document listing the input an interactive session would
//! produce. Replaying it drives an [`Editor`] exactly as live input would, and
//! the resulting state is reported as a [`SessionSummary`].

use crate::shortcuts::ShortcutRegistry;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxdraft_core::{
    Annotation, Camera, CellColor, ColorParseError, ConfigError, Editor, EditorConfig, GridConfig,
    KeyChord, PointerEvent, ToolKind,
};

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Color error: {0}")]
    Color(#[from] ColorParseError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Pointer {
        event: PointerEvent,
    },
    Key {
        chord: KeyChord,
        #[serde(default)]
        text_input_focused: bool,
    },
    Tool {
        tool: ToolKind,
    },
    /// Hex color such as `#ef4444`.
    Color {
        color: String,
    },
    BrushSize {
        size: u32,
    },
    Grid {
        config: GridConfig,
    },
    ClearGrid,
    ClearAnnotations,
    /// Remove the annotation at a position in the list.
    RemoveAnnotation {
        index: usize,
    },
    Undo,
    Redo,
    ResetView {
        viewport: Size,
    },
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EditorConfig,
    /// Viewport to center the grid in before the first step.
    #[serde(default)]
    pub viewport: Option<Size>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An occupied cell, by global position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSummary {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

/// Final editor state after a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub grid: GridConfig,
    /// Occupied cells, row by row.
    pub cells: Vec<CellSummary>,
    pub annotations: Vec<Annotation>,
    /// Undoable actions, oldest first.
    pub undo: Vec<String>,
    /// Redoable actions, next first.
    pub redo: Vec<String>,
    pub camera: Camera,
    pub tool: ToolKind,
    pub color: String,
    pub brush_size: u32,
}

impl SessionSummary {
    pub fn from_editor(editor: &Editor) -> Self {
        let config = editor.grid_config();
        let mut cells: Vec<_> = editor
            .grid()
            .cells()
            .map(|(addr, cell)| {
                let global = addr.global(&config);
                CellSummary {
                    x: global.x,
                    y: global.y,
                    color: cell.color.to_hex(),
                }
            })
            .collect();
        cells.sort_by_key(|c| (c.y, c.x));

        let history = editor.history();
        Self {
            grid: config,
            cells,
            annotations: editor.annotations().annotations().to_vec(),
            undo: history.past().iter().map(|a| a.kind().to_string()).collect(),
            redo: history.future().map(|a| a.kind().to_string()).collect(),
            camera: editor.camera.clone(),
            tool: editor.tools().current_tool,
            color: editor.tools().color.to_hex(),
            brush_size: editor.tools().brush_size(),
        }
    }
}

/// Replays scripts against a fresh editor.
#[derive(Debug)]
pub struct Session {
    editor: Editor,
}

impl Session {
    pub fn new(config: EditorConfig) -> SessionResult<Self> {
        Ok(Self {
            editor: Editor::new(config)?,
        })
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Run every step of a script.
    pub fn run(script: &Script) -> SessionResult<Self> {
        let mut session = Self::new(script.config.clone())?;
        if let Some(viewport) = script.viewport {
            session.editor.reset_view(viewport);
        }
        for (i, step) in script.steps.iter().enumerate() {
            log::trace!("Step {i}: {step:?}");
            session.apply(step)?;
        }
        Ok(session)
    }

    /// Apply one scripted input.
    pub fn apply(&mut self, step: &Step) -> SessionResult<()> {
        let editor = &mut self.editor;
        match step {
            Step::Pointer { event } => editor.handle_event(*event),
            Step::Key {
                chord,
                text_input_focused,
            } => {
                if editor.handle_key(chord, *text_input_focused).is_none() && !text_input_focused {
                    if let Some(tool) = ShortcutRegistry::tool_for_key(&chord.key, chord.modifiers) {
                        editor.set_tool(tool);
                    }
                }
            }
            Step::Tool { tool } => editor.set_tool(*tool),
            Step::Color { color } => editor.set_color(color.parse::<CellColor>()?),
            Step::BrushSize { size } => editor.set_brush_size(*size)?,
            Step::Grid { config } => editor.set_grid_config(*config)?,
            Step::ClearGrid => editor.clear_grid(),
            Step::ClearAnnotations => {
                editor.clear_annotations();
            }
            Step::RemoveAnnotation { index } => {
                let id = editor.annotations().annotations().get(*index).map(|a| a.id);
                match id {
                    Some(id) => {
                        editor.remove_annotation(id);
                    }
                    None => log::warn!("No annotation at index {index}"),
                }
            }
            Step::Undo => {
                editor.undo();
            }
            Step::Redo => {
                editor.redo();
            }
            Step::ResetView { viewport } => editor.reset_view(*viewport),
        }
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_editor(&self.editor)
    }
}
