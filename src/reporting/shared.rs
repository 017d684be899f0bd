use crate::analysis::FileOutcome;
use crate::types::{Finding, Severity};
use std::collections::HashMap;
use std::path::Path;

pub(crate) fn collect_findings(outcomes: &[FileOutcome]) -> Vec<(&Path, &Finding)> {
    let mut all: Vec<(&Path, &Finding)> = Vec::new();
    for file in outcomes {
        if let Ok(report) = &file.result {
            for f in &report.findings {
                all.push((&file.path, f));
            }
        }
    }
    all
}

pub(crate) fn rule_counts<'a>(all: &[(&Path, &'a Finding)]) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, f) in all {
        *counts.entry(f.rule_id.as_str()).or_insert(0) += 1;
    }
    counts
}

pub(crate) fn next_occurrence<'a>(shown: &mut HashMap<&'a str, usize>, rule: &'a str) -> usize {
    let entry = shown.entry(rule).or_insert(0);
    *entry += 1;
    *entry
}

pub(crate) fn severity_counts(all: &[(&Path, &Finding)]) -> Vec<(Severity, usize)> {
    Severity::ALL
        .into_iter()
        .map(|s| (s, all.iter().filter(|(_, f)| f.severity == s).count()))
        .filter(|&(_, n)| n > 0)
        .collect()
}

pub(crate) fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Engine, Source};
    use crate::config::AnalysisContext;

    #[test]
    fn counts_group_by_rule_and_severity() {
        let sources = vec![
            Source::new("a.tsx", "const a = <div><img src=\"a.png\" /><img src=\"b.png\" /></div>;"),
            Source::new("b.tsx", "const b = <div><span></div>;"),
        ];
        let outcomes = Engine::default().analyze_batch(&sources, &AnalysisContext::default());
        let all = collect_findings(&outcomes);
        let counts = rule_counts(&all);
        assert_eq!(counts.get("a11y.image-without-alt"), Some(&2));

        let by_sev = severity_counts(&all);
        assert!(by_sev.iter().any(|&(s, n)| s == Severity::High && n >= 2));
        assert_eq!(pluralize("finding", 1), "finding");
        assert_eq!(pluralize("finding", 2), "findings");
    }
}
