//! Keyboard shortcut registry and documentation.

use voxdraft_core::{Modifiers, ToolKind};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    /// Tool selected by this shortcut, if any.
    pub tool: Option<ToolKind>,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            tool: None,
        }
    }

    /// A plain key that switches tools.
    pub const fn tool(key: &'static str, tool: ToolKind, description: &'static str) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            description,
            tool: Some(tool),
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Check whether a key press triggers this shortcut.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::tool("B", ToolKind::VoxelPlace, "Place cells"),
            Shortcut::tool("E", ToolKind::Eraser, "Erase cells"),
            Shortcut::tool("L", ToolKind::Line, "Draw line"),
            Shortcut::tool("R", ToolKind::Rectangle, "Draw rectangle"),
            Shortcut::tool("D", ToolKind::FreeDraw, "Free draw"),
            Shortcut::tool("H", ToolKind::Pan, "Pan view"),
            Shortcut::new("Middle+Drag", false, false, "Pan view with any tool"),
            Shortcut::new("Wheel", false, false, "Zoom at pointer"),
        ]
    }

    /// Tool bound to a key press, if any.
    pub fn tool_for_key(key: &str, modifiers: Modifiers) -> Option<ToolKind> {
        Self::all()
            .into_iter()
            .find(|s| s.tool.is_some() && s.matches(key, modifiers))
            .and_then(|s| s.tool)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
