//! Output formatting for analysis results.
//!
//! Console output groups findings by rule. JSON output is pretty-printed and
//! byte-identical for identical inputs.

mod console;
pub(crate) mod shared;

pub use console::print_report;

use crate::analysis::FileOutcome;
use crate::report::Report;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// JSON shape of one scanned file.
#[derive(Debug, Serialize)]
pub struct FileJson<'a> {
    pub path: &'a Path,
    pub fingerprint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON shape of a whole scan.
#[derive(Debug, Serialize)]
pub struct ScanJson<'a> {
    pub files: Vec<FileJson<'a>>,
    pub total_findings: usize,
    pub blocking: bool,
}

impl<'a> ScanJson<'a> {
    #[must_use]
    pub fn new(outcomes: &'a [FileOutcome]) -> Self {
        let files = outcomes
            .iter()
            .map(|o| FileJson {
                path: &o.path,
                fingerprint: &o.fingerprint,
                report: o.result.as_ref().ok(),
                error: o.result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        let reports = || outcomes.iter().filter_map(|o| o.result.as_ref().ok());
        Self {
            files,
            total_findings: reports().map(|r| r.findings.len()).sum(),
            blocking: reports().any(Report::has_blocking),
        }
    }
}

/// Serializes `data` as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Prints `data` as pretty JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", to_json(data)?);
    Ok(())
}
