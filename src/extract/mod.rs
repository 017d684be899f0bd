// src/extract/mod.rs
//! Structural extraction: component source in, fact tree out.

pub mod fact;
mod parser;
pub mod script;
pub mod style;

pub use fact::{AttrValue, ElementFact, FactTree, Iteration, ListBound, NodeId, Span, ROOT};
pub use script::ScriptFacts;
pub use style::{px_value, ClassList, InlineStyle, StyleValue};

use crate::error::ParseError;

/// Parses one component into its fact tree.
///
/// # Errors
/// Returns `ParseError` on malformed markup. There is no partial result.
pub fn extract(source: &str) -> Result<FactTree, ParseError> {
    let parsed = parser::Parser::new(source).run()?;
    let script = ScriptFacts::scan(&parsed.script, &parsed.css);
    Ok(parsed.tree.finish(script))
}
