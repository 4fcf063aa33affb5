//! VoxDraft Application
//!
//! The application shell: replays recorded input scripts against the editor
//! core and reports the resulting document and history state.

mod app;
mod session;
mod shortcuts;

pub use app::{App, AppConfig};
pub use session::{CellSummary, Script, Session, SessionError, SessionResult, SessionSummary, Step};
pub use shortcuts::{Shortcut, ShortcutRegistry};
