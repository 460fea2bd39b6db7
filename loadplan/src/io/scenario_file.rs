//! Scenario files (TOML) describing one load test.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::scenario::{Parameter, ScenarioSource, ScenarioSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub threads: i64,
    #[serde(default)]
    pub ramp_up_seconds: i64,
    /// Pipe-delimited credentials, header row first, one row per virtual user.
    pub csv_path: String,
    pub request: RequestSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSection {
    pub path: String,
    pub method: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ScenarioSource for ScenarioFile {
    fn thread_count(&self) -> i64 {
        self.threads
    }

    fn ramp_up_seconds(&self) -> i64 {
        self.ramp_up_seconds
    }

    fn endpoint_path(&self) -> &str {
        &self.request.path
    }

    fn method(&self) -> &str {
        &self.request.method
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.request.parameters.clone()
    }

    fn csv_path(&self) -> &str {
        &self.csv_path
    }

    fn body(&self) -> Option<&str> {
        self.request.body.as_deref()
    }

    fn body_content_type(&self) -> Option<&str> {
        self.request.content_type.as_deref()
    }
}

/// Read and parse a scenario file. Structural checks happen at build time.
pub fn load_scenario_file(path: &Path) -> Result<ScenarioFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read scenario {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse scenario {}", path.display()))
}

/// Load a scenario file and convert it into a [`ScenarioSpec`].
pub fn load_scenario(path: &Path) -> Result<ScenarioSpec> {
    let file = load_scenario_file(path)?;
    let spec = ScenarioSpec::from_source(&file)?;
    Ok(spec)
}
