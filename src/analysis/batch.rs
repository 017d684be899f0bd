// src/analysis/batch.rs
//! Parallel analysis of many components, memoized by content fingerprint.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use super::Engine;
use crate::config::AnalysisContext;
use crate::error::AnalysisError;
use crate::report::Report;
use crate::utils::fingerprint;

/// One component's text, already read by the caller.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub text: String,
}

impl Source {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// SHA-256 of the normalized source and the context.
    pub fingerprint: String,
    pub result: Result<Report, AnalysisError>,
}

impl Engine {
    /// Analyzes every source in parallel. Sources with the same fingerprint
    /// are analyzed once. Outcomes keep input order.
    #[must_use]
    pub fn analyze_batch(&self, sources: &[Source], ctx: &AnalysisContext) -> Vec<FileOutcome> {
        let start = Instant::now();
        let prints: Vec<String> = sources.par_iter().map(|s| fingerprint(&s.text, ctx)).collect();

        let mut unique: HashMap<&str, &Source> = HashMap::new();
        for (print, source) in prints.iter().zip(sources) {
            unique.entry(print.as_str()).or_insert(source);
        }
        info!(files = sources.len(), unique = unique.len(), "analyzing batch");

        let memo: HashMap<&str, Result<Report, AnalysisError>> = unique
            .into_par_iter()
            .map(|(print, source)| (print, self.analyze(&source.text, ctx)))
            .collect();

        let outcomes: Vec<FileOutcome> = sources
            .iter()
            .zip(&prints)
            .filter_map(|(source, print)| {
                let result = memo.get(print.as_str())?.clone();
                Some(FileOutcome {
                    path: source.path.clone(),
                    fingerprint: print.clone(),
                    result,
                })
            })
            .collect();

        info!(
            files = outcomes.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "batch complete"
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_keep_input_order_and_share_identical_work() {
        let same = "const a = <img src=\"x.png\" />;";
        let sources = vec![
            Source::new("a.tsx", same),
            Source::new("b.tsx", "const b = <p>ok</p>;"),
            Source::new("c.tsx", same),
            Source::new("d.tsx", "const d = <div><span></div>;"),
        ];
        let outcomes = Engine::default().analyze_batch(&sources, &AnalysisContext::default());

        let paths: Vec<_> = outcomes.iter().map(|o| o.path.to_string_lossy().into_owned()).collect();
        assert_eq!(paths, vec!["a.tsx", "b.tsx", "c.tsx", "d.tsx"]);
        assert_eq!(outcomes[0].fingerprint, outcomes[2].fingerprint);
        assert_ne!(outcomes[0].fingerprint, outcomes[1].fingerprint);
        assert_eq!(outcomes[0].result, outcomes[2].result);
        assert!(matches!(outcomes[3].result, Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn batch_matches_single_analysis() {
        let src = "const a = <div onClick={go}>Go</div>;";
        let ctx = AnalysisContext::default();
        let engine = Engine::default();
        let outcomes = engine.analyze_batch(&[Source::new("a.tsx", src)], &ctx);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result, engine.analyze(src, &ctx));
    }
}
