//! Static accessibility, responsive, performance and UX analysis for
//! React/TSX components.
//!
//! ```no_run
//! use uxscan_core::{analyze, AnalysisContext};
//!
//! let report = analyze(r#"const a = <img src="hero.png" />;"#, &AnalysisContext::default())?;
//! assert!(report.has_blocking());
//! # Ok::<(), uxscan_core::error::AnalysisError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod contrast;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod extract;
pub mod guidelines;
pub mod report;
pub mod reporting;
pub mod rules;
pub mod types;
pub mod utils;

pub use analysis::{analyze, Engine};
pub use config::AnalysisContext;
pub use error::{AnalysisError, InvalidColorError, ParseError};
pub use report::Report;
pub use types::{Category, Finding, Severity};
