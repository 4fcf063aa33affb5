//! Pointer and keyboard input events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Button released, wherever the pointer is.
    Up,
    /// Pointer left the drawing surface.
    Leave,
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

/// A key press together with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    /// Logical key, e.g. `"z"` or `"Escape"`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// Commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorCommand {
    Undo,
    Redo,
}

/// Map a key chord to an editor command.
///
/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Y and Ctrl/Cmd+Shift+Z redo. Nothing is
/// resolved while a text field has focus, so typing there keeps its own
/// undo behavior.
pub fn resolve_shortcut(chord: &KeyChord, text_input_focused: bool) -> Option<EditorCommand> {
    if text_input_focused || !chord.modifiers.command() {
        return None;
    }
    match chord.key.to_lowercase().as_str() {
        "z" if chord.modifiers.shift => Some(EditorCommand::Redo),
        "z" => Some(EditorCommand::Undo),
        "y" => Some(EditorCommand::Redo),
        _ => None,
    }
}
