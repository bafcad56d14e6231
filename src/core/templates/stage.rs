//! Template Rewrite Stage
//!
//! Applies a server-side query template before query preparation and restores
//! the request afterwards. Clients activate the rewrite with the `ssq` flag
//! and pick a template with `ssq.query`; the client's own query term is
//! injected into a target parameter (default `qq`) for substitution inside
//! the template text.
//!
//! Every abnormal condition (flag off, missing selector, an already
//! populated target parameter) degrades to a silent no-op. The only failure
//! that escapes is whatever the wrapped preparation stage itself raises.

use super::keys;
use crate::core::params::{RequestParams, ALT_Q, Q};
use crate::core::pipeline::{PipelineResult, QueryPrepare};
use crate::core::request::SearchRequest;

/// Decorator around the host's query-preparation stage.
///
/// `prepare` runs the rewrite, delegates to the wrapped stage, and restores
/// the request afterwards. A failing inner stage propagates unmodified and
/// skips the restore.
pub struct TemplateStage<S> {
    inner: S,
}

impl<S: QueryPrepare> TemplateStage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: QueryPrepare> QueryPrepare for TemplateStage<S> {
    fn prepare(&mut self, req: &mut SearchRequest) -> PipelineResult<()> {
        let applied = apply(req);

        if applied {
            log::debug!("Applied query template, request params: {:?}", req.params());
        }

        self.inner.prepare(req)?;

        if applied && restore(req) {
            log::trace!("Restored query string after template execution");
        }

        Ok(())
    }
}

/// Rewrite the request to execute a server-side query template.
///
/// Returns `true` when the rewrite was performed. When any activation
/// condition fails the request is left byte-for-byte untouched.
pub fn apply(req: &mut SearchRequest) -> bool {
    // activation flag, default off
    if !req.params().get_bool(keys::SSQ_PREFIX, false) {
        return false;
    }

    // template selector and target parameter name; both must be non-empty
    let selector = match req.params().get(&keys::selector_key()) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => return false,
    };
    let target = req
        .params()
        .get_or(&keys::target_param_key(), keys::SSQ_PARAM_DFT)
        .to_string();
    if target.is_empty() {
        return false;
    }

    // an already-populated target parameter wins: leave the request alone
    if req
        .params()
        .get(&target)
        .map_or(false, |v| !v.is_empty())
    {
        return false;
    }

    // query term to substitute, from the client's original q; fall back to
    // the alternate query when the primary is absent or empty
    let orig_q = req.original_params().get(Q).map(str::to_string);
    let qval = match orig_q.as_deref() {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => match req.params().get(ALT_Q) {
            Some(alt) if !alt.is_empty() => Some(alt.to_string()),
            _ => orig_q.clone(),
        },
    };

    // resolve the selector against registered templates; an unregistered
    // selector is executed verbatim as an inline template
    let template = match req.params().get(&keys::registered_template_key(&selector)) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => selector,
    };

    let mut overlay = RequestParams::new();
    overlay.set(keys::applied_key(), "true");

    // record the pre-rewrite query string, but only when it diverged from q;
    // an empty string here is meaningful (see restore)
    if let (Some(q), Some(qs)) = (orig_q.as_deref(), req.query_string()) {
        if qs != q {
            overlay.set(keys::querystring_applied_key(), qs);
        }
    }

    if let Some(val) = qval {
        overlay.set(&target, val);
    }
    overlay.set(keys::template_applied_key(), &template);

    req.set_params(req.params().overlaid_with(&overlay));
    req.set_query_string(Some(template));

    true
}

/// Undo the query-string side of a rewrite performed by [`apply`].
///
/// Returns `true` when a rewrite was on record. Parameter overlay entries
/// other than the saved query string stay in place as an audit trail of what
/// was substituted.
pub fn restore(req: &mut SearchRequest) -> bool {
    if !req.params().get_bool(keys::SSQ_PREFIX, false) {
        return false;
    }
    if !req.params().get_bool(&keys::applied_key(), false) {
        return false;
    }

    let saved_key = keys::querystring_applied_key();
    let saved = req.params().get(&saved_key).map(str::to_string);

    match saved.as_deref() {
        // empty marker: the query string was empty when the rewrite ran;
        // refill it from the client's original q
        Some("") => {
            let q = req.original_params().get(Q).map(str::to_string);
            req.set_query_string(q);
        }
        Some(stored) => {
            let stored = stored.to_string();
            let mut params = req.params().clone();
            params.remove(&saved_key);
            req.set_params(params);
            req.set_query_string(Some(stored));
        }
        // nothing recorded: the query string never diverged from q, so q is
        // the pre-rewrite value; a repeated restore lands here harmlessly
        None => {
            let q = req.original_params().get(Q).map(str::to_string);
            req.set_query_string(q);
        }
    }

    true
}
