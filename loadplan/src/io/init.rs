//! Scaffolding for a new load-test directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::{SETTINGS_FILE, write_settings};
use crate::core::settings::BuilderSettings;

pub const SCENARIO_FILE: &str = "scenario.toml";

const SAMPLE_SCENARIO: &str = r#"# Virtual users and the window over which they start.
threads = 5
ramp_up_seconds = 2

# Pipe-delimited, header row first; one row per virtual user, never reused.
csv_path = "users.csv"

[request]
path = "/webapi/account"
method = "POST"
# body = '{"name":"${name}"}'
# content_type = "application/json"

[[request.parameters]]
name = "key"
value = "${key}"
"#;

/// Options for `init_dir`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing files.
    pub force: bool,
}

/// Files written (or left in place) by `init_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write sample `scenario.toml` and `loadplan.toml` into `dir`.
pub fn init_dir(dir: &Path, options: &InitOptions) -> Result<InitReport> {
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    let mut report = InitReport {
        written: Vec::new(),
        skipped: Vec::new(),
    };

    let scenario_path = dir.join(SCENARIO_FILE);
    if options.force || !scenario_path.exists() {
        fs::write(&scenario_path, SAMPLE_SCENARIO)
            .with_context(|| format!("write {}", scenario_path.display()))?;
        report.written.push(scenario_path);
    } else {
        report.skipped.push(scenario_path);
    }

    let settings_path = dir.join(SETTINGS_FILE);
    if options.force || !settings_path.exists() {
        write_settings(&settings_path, &BuilderSettings::default())?;
        report.written.push(settings_path);
    } else {
        report.skipped.push(settings_path);
    }

    Ok(report)
}
