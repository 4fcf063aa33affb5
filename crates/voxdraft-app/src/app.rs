//! Application shell: loads scripts, runs sessions, reports results.

use crate::session::{Script, Session, SessionResult, SessionSummary};
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Indent the printed summary.
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "VoxDraft".to_string(),
            pretty: false,
        }
    }
}

/// Main application struct.
#[derive(Debug, Default)]
pub struct App {
    config: AppConfig,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read a script from disk.
    pub fn load_script(path: &Path) -> SessionResult<Script> {
        let json = std::fs::read_to_string(path)?;
        Script::from_json(&json)
    }

    /// Replay a script and summarize the result.
    pub fn run_script(&self, script: &Script) -> SessionResult<SessionSummary> {
        log::info!("{}: replaying {} steps", self.config.title, script.steps.len());
        let session = Session::run(script)?;
        let summary = session.summary();
        log::info!(
            "{}: {} cells, {} annotations, {} undoable actions",
            self.config.title,
            summary.cells.len(),
            summary.annotations.len(),
            summary.undo.len()
        );
        Ok(summary)
    }

    /// Format a summary as JSON.
    pub fn render_summary(&self, summary: &SessionSummary) -> SessionResult<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        Ok(json)
    }

    /// Load, replay and format a script file.
    pub fn run_file(&self, path: &Path) -> SessionResult<String> {
        let script = Self::load_script(path)?;
        let summary = self.run_script(&script)?;
        self.render_summary(&summary)
    }
}
