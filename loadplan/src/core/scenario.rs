//! Caller-supplied scenario parameters.

use serde::{Deserialize, Serialize};

use crate::core::method::HttpMethod;
use crate::error::PlanError;

/// One query/form argument for the target request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Accessor-style view a concrete load scenario exposes to the builder.
pub trait ScenarioSource {
    fn thread_count(&self) -> i64;
    fn ramp_up_seconds(&self) -> i64;
    fn endpoint_path(&self) -> &str;
    /// Raw method name; parsed case-insensitively.
    fn method(&self) -> &str;
    fn parameters(&self) -> Vec<Parameter>;
    fn csv_path(&self) -> &str;
    fn body(&self) -> Option<&str>;
    fn body_content_type(&self) -> Option<&str>;
}

/// Scenario parameters for a single plan build.
///
/// Counts are signed so that out-of-range values surface as configuration
/// errors from [`ScenarioSpec::validate`] instead of being unrepresentable
/// at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpec {
    pub thread_count: i64,
    pub ramp_up_seconds: i64,
    pub endpoint_path: String,
    pub method: HttpMethod,
    /// Attached in order; duplicate names are kept.
    pub parameters: Vec<Parameter>,
    pub csv_path: String,
    pub body: Option<String>,
    pub body_content_type: Option<String>,
}

impl ScenarioSpec {
    pub fn from_source(source: &dyn ScenarioSource) -> Result<Self, PlanError> {
        Ok(Self {
            thread_count: source.thread_count(),
            ramp_up_seconds: source.ramp_up_seconds(),
            endpoint_path: source.endpoint_path().to_string(),
            method: source.method().parse()?,
            parameters: source.parameters(),
            csv_path: source.csv_path().to_string(),
            body: source.body().map(str::to_string),
            body_content_type: source.body_content_type().map(str::to_string),
        })
    }

    /// Body text when present and non-empty.
    pub fn raw_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    /// Content type when present and non-blank.
    pub fn content_type(&self) -> Option<&str> {
        self.body_content_type
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    /// Structural checks only; values are otherwise passed through untouched.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.thread_count <= 0 {
            return Err(PlanError::InvalidThreadCount(self.thread_count));
        }
        if self.ramp_up_seconds < 0 {
            return Err(PlanError::NegativeRampUp(self.ramp_up_seconds));
        }
        // Whitespace-only paths count as empty.
        if self.endpoint_path.trim().is_empty() {
            return Err(PlanError::EmptyEndpoint);
        }
        if self.raw_body().is_some() && self.content_type().is_none() {
            return Err(PlanError::MissingContentType);
        }
        Ok(())
    }
}
