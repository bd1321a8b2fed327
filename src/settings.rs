//! Settings infrastructure for pumlsp.
//!
//! Supports loading settings.toml files to configure how the external
//! PlantUML syntax checker is invoked.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::checker::ProcessChecker;

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Checker invocation configuration.
    pub checker: Option<CheckerSettings>,
}

/// Configuration for the external syntax checker process.
#[derive(Debug, Default, Deserialize)]
pub struct CheckerSettings {
    /// Executable to invoke (default: "plantuml").
    pub command: Option<String>,

    /// Arguments to pass; the document is piped on stdin
    /// (default: ["-syntax"]).
    pub args: Option<Vec<String>>,
}

/// Build the process checker described by the settings, falling back to
/// the defaults for anything unset.
pub fn build_checker(settings: &Settings) -> ProcessChecker {
    let defaults = ProcessChecker::default();
    let Some(checker) = settings.checker.as_ref() else {
        return defaults;
    };

    match (&checker.command, &checker.args) {
        (Some(command), Some(args)) => ProcessChecker::new(command.clone(), args.clone()),
        (Some(command), None) => {
            ProcessChecker::new(command.clone(), vec!["-syntax".to_string()])
        }
        (None, Some(args)) => ProcessChecker::new("plantuml".to_string(), args.clone()),
        (None, None) => defaults,
    }
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Warning: failed to parse settings.toml: {}", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree, then direct
/// children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join("settings.toml");
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join("settings.toml");
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}
