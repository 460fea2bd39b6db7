//! Test-only helpers for building scenarios and scenario files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::method::HttpMethod;
use crate::core::scenario::{Parameter, ScenarioSpec};

/// Five users over two seconds hitting `/api/account` with one parameter.
pub fn sample_spec(method: HttpMethod) -> ScenarioSpec {
    ScenarioSpec {
        thread_count: 5,
        ramp_up_seconds: 2,
        endpoint_path: "/api/account".to_string(),
        method,
        parameters: vec![Parameter::new("name", "Alice")],
        csv_path: "users.csv".to_string(),
        body: Some(String::new()),
        body_content_type: None,
    }
}

/// Scenario TOML matching [`sample_spec`] with the given method.
pub fn sample_scenario_toml(method: &str) -> String {
    format!(
        r#"threads = 5
ramp_up_seconds = 2
csv_path = "users.csv"

[request]
path = "/api/account"
method = "{method}"

[[request.parameters]]
name = "name"
value = "Alice"
"#
    )
}

/// Temporary directory holding scenario and settings files.
pub struct ScenarioDir {
    temp: tempfile::TempDir,
}

impl ScenarioDir {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` to `name` under the root and return its path.
    pub fn write(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
