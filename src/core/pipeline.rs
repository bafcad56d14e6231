//! Pipeline Stage Contract
//!
//! The seam between this component and the hosting search pipeline: a
//! query-preparation stage that turns the request's query string into an
//! executable query, and the error type such stages raise.

use thiserror::Error;

use super::request::SearchRequest;

/// Errors raised by query-preparation stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The query string could not be parsed.
    #[error("Query parse error: {0}")]
    QueryParse(String),

    /// The stage failed for a reason other than parsing.
    #[error("Prepare failed: {0}")]
    Prepare(String),

    /// Invalid stage or pipeline configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error from stages that touch the filesystem.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create a query parse error with the given message.
    pub fn query_parse(msg: impl Into<String>) -> Self {
        Self::QueryParse(msg.into())
    }

    /// Create a prepare error with the given message.
    pub fn prepare(msg: impl Into<String>) -> Self {
        Self::Prepare(msg.into())
    }

    /// Create a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for pipeline stages.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A pipeline stage invoked to prepare a request's query for execution.
///
/// Implementations read the request's query string and parameters and leave
/// an executable query behind for later stages. Decorating stages wrap the
/// call rather than subclassing it.
pub trait QueryPrepare {
    fn prepare(&mut self, req: &mut SearchRequest) -> PipelineResult<()>;
}
