//! Main application entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use voxdraft_app::{App, AppConfig, ShortcutRegistry};

const USAGE: &str = "Usage: voxdraft [--pretty] <script.json>\n       voxdraft --shortcuts";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting VoxDraft");

    let mut config = AppConfig::default();
    let mut script: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pretty" => config.pretty = true,
            "--shortcuts" => {
                ShortcutRegistry::print_all();
                return ExitCode::SUCCESS;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ => script = Some(PathBuf::from(&arg)),
        }
    }

    let Some(script) = script else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match App::with_config(config).run_file(&script) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to run {}: {e}", script.display());
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
