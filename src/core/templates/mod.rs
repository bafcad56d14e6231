//! Server-Side Query Templates
//!
//! The rewrite/restore pair bracketing the host's query-preparation stage.
//! `apply` decides whether a request activates a registered template,
//! injects the client's query term into the target parameter, and swaps the
//! query string for the template text; `restore` puts the query string back
//! once preparation has run. [`TemplateStage`] wires both around an inner
//! [`QueryPrepare`](crate::core::pipeline::QueryPrepare) stage.

pub mod keys;
pub mod stage;

pub use stage::{apply, restore, TemplateStage};
