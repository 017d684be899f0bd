// src/analysis/mod.rs
//! Analysis orchestration: single components and batches.

pub mod batch;
pub mod engine;

pub use batch::{FileOutcome, Source};
pub use engine::Engine;

use crate::config::AnalysisContext;
use crate::error::Result;
use crate::report::Report;

/// Analyzes one component with the built-in rules and default rule settings.
///
/// # Errors
/// Returns `AnalysisError::Parse` when the source is malformed.
pub fn analyze(source: &str, ctx: &AnalysisContext) -> Result<Report> {
    Engine::default().analyze(source, ctx)
}
