//! Parameter Namespace
//!
//! Key construction for the `ssq` parameter namespace. The bare prefix is the
//! activation flag; every other key is prefix + delimiter + segments.

/// Namespace prefix; on its own it is the activation flag.
pub const SSQ_PREFIX: &str = "ssq";
/// Delimiter between key segments.
pub const SSQ_DELIM: &str = ".";
/// Default target parameter populated with the client's query term.
pub const SSQ_PARAM_DFT: &str = "qq";

const SSQ_QUERY: &str = "query";
const SSQ_QUERYSTRING: &str = "querystring";
const SSQ_PARAM: &str = "param";
const SSQ_APPLIED: &str = "applied";

fn join(segments: &[&str]) -> String {
    segments.join(SSQ_DELIM)
}

/// `ssq.query`: the template selector supplied by the client.
pub fn selector_key() -> String {
    join(&[SSQ_PREFIX, SSQ_QUERY])
}

/// `ssq.param`: names the target parameter to populate.
pub fn target_param_key() -> String {
    join(&[SSQ_PREFIX, SSQ_PARAM])
}

/// `ssq.applied`: set once a rewrite has been performed.
pub fn applied_key() -> String {
    join(&[SSQ_PREFIX, SSQ_APPLIED])
}

/// `ssq.query.applied`: the template text that was substituted in.
pub fn template_applied_key() -> String {
    join(&[SSQ_PREFIX, SSQ_QUERY, SSQ_APPLIED])
}

/// `ssq.querystring.applied`: the saved pre-rewrite query string.
pub fn querystring_applied_key() -> String {
    join(&[SSQ_PREFIX, SSQ_QUERYSTRING, SSQ_APPLIED])
}

/// `ssq.query.<selector>`: a registered template for the given selector.
pub fn registered_template_key(selector: &str) -> String {
    join(&[SSQ_PREFIX, SSQ_QUERY, selector])
}
