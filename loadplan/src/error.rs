//! Errors surfaced by plan construction.

use thiserror::Error;

/// Caller-fixable scenario defects detected before any tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("configuration error: thread count must be > 0, got {0}")]
    InvalidThreadCount(i64),

    #[error("configuration error: ramp-up seconds must be >= 0, got {0}")]
    NegativeRampUp(i64),

    #[error("configuration error: endpoint path must not be empty")]
    EmptyEndpoint,

    #[error("configuration error: request body requires a content type")]
    MissingContentType,

    #[error("configuration error: unknown http method '{0}'")]
    UnknownMethod(String),
}

impl PlanError {
    /// Every variant is a configuration error; no transient failures exist here.
    pub fn is_configuration(&self) -> bool {
        true
    }
}
