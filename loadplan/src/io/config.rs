//! Builder settings stored in `loadplan.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::settings::BuilderSettings;

pub const SETTINGS_FILE: &str = "loadplan.toml";

/// Load settings from a TOML file.
///
/// If the file is missing, returns `BuilderSettings::default()`.
pub fn load_settings(path: &Path) -> Result<BuilderSettings> {
    if !path.exists() {
        let settings = BuilderSettings::default();
        settings.validate()?;
        return Ok(settings);
    }
    read_settings(path)
}

/// Load settings from a file the caller named explicitly; a missing file is an error.
pub fn load_settings_required(path: &Path) -> Result<BuilderSettings> {
    read_settings(path)
}

fn read_settings(path: &Path) -> Result<BuilderSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    let settings: BuilderSettings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(settings)
}

/// Atomically write settings to disk (temp file + rename).
pub fn write_settings(path: &Path, settings: &BuilderSettings) -> Result<()> {
    settings.validate()?;
    let mut buf = toml::to_string_pretty(settings).context("serialize settings toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("settings path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp settings {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace settings {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(settings, BuilderSettings::default());
    }

    #[test]
    fn required_load_rejects_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("staging.toml");
        let err = load_settings_required(&path).expect_err("missing");
        assert!(err.to_string().contains("read settings"));
        assert!(err.to_string().contains("staging.toml"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE);
        let mut settings = BuilderSettings::default();
        settings.server.domain = "perf.example".to_string();
        write_settings(&path, &settings).expect("write");
        let loaded = load_settings(&path).expect("load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn load_rejects_invalid_settings() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "[server]\nport = 0\n").expect("write");
        let err = load_settings(&path).expect_err("port 0");
        assert!(format!("{err:#}").contains("server.port must be > 0"));
    }
}
