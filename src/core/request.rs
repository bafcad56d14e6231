//! Search Request
//!
//! The request object that crosses pipeline-stage boundaries. It carries the
//! client's original parameters (immutable), the active parameter view that
//! stages may replace with an overlaid copy, and the literal query string the
//! query-compilation stage will parse.

use serde::{Deserialize, Serialize};

use super::params::{RequestParams, Q};

/// A single search request traversing the pipeline.
///
/// One instance exists per request; nothing here is shared across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    original: RequestParams,
    active: RequestParams,
    query_string: Option<String>,
}

impl SearchRequest {
    /// Create a request from the client's parameters.
    ///
    /// The query string is initialized from the `q` parameter, matching how
    /// the hosting pipeline seeds it before any stage runs. `None` means the
    /// client supplied no query text at all.
    pub fn new(params: RequestParams) -> Self {
        let query_string = params.get(Q).map(str::to_string);
        Self {
            active: params.clone(),
            original: params,
            query_string,
        }
    }

    /// Create a request with server-configured defaults layered *under* the
    /// client's parameters (client values win; defaults only fill gaps).
    ///
    /// The original view stays client-only.
    pub fn with_defaults(params: RequestParams, defaults: &RequestParams) -> Self {
        let active = params.with_defaults(defaults);
        let query_string = active.get(Q).map(str::to_string);
        Self {
            original: params,
            active,
            query_string,
        }
    }

    /// The parameters exactly as the client sent them.
    pub fn original_params(&self) -> &RequestParams {
        &self.original
    }

    /// The current parameter view, including any overlays stages installed.
    pub fn params(&self) -> &RequestParams {
        &self.active
    }

    /// Replace the active parameter view. The original view is unaffected.
    pub fn set_params(&mut self, params: RequestParams) {
        self.active = params;
    }

    /// The literal text the query-compilation stage will parse.
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    pub fn set_query_string(&mut self, query_string: Option<String>) {
        self.query_string = query_string;
    }
}
