//! ssq - Server-side query templates for search request pipelines
//!
//! Lets clients activate named, server-registered query expressions and have
//! the pipeline execute one of those templates in place of the free-text
//! query, with the original query term injected as a substitution value. The
//! request is restored afterwards so downstream stages behave as if no
//! rewrite happened.

pub mod config;
pub mod core;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
