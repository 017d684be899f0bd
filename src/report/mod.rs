// src/report/mod.rs
//! Report aggregation: folds rule output into one deterministic `Report`.

pub mod scoring;

pub use scoring::{Grade, Scores};

use crate::types::{Category, ConfigurationWarning, Finding, Severity};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_findings: usize,
    /// One entry per category that ran, zero counts included.
    pub by_category: BTreeMap<Category, usize>,
    /// One entry per severity, zero counts included.
    pub by_severity: BTreeMap<Severity, usize>,
    pub warnings: Vec<ConfigurationWarning>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// Distinct elements read by at least one rule.
    pub elements_scanned: usize,
    pub rules_applied: usize,
}

/// The result of analyzing one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub findings: Vec<Finding>,
    pub coverage: Coverage,
    pub scores: Scores,
}

impl Report {
    /// True when any finding is critical or high.
    #[must_use]
    pub fn has_blocking(&self) -> bool {
        self.findings.iter().any(|f| f.severity.is_blocking())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.summary.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

/// Collects findings in discovery order while rules run.
#[derive(Debug, Default)]
pub struct Aggregator {
    findings: Vec<Finding>,
    warnings: Vec<ConfigurationWarning>,
    categories: BTreeSet<Category>,
    rules_applied: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new(warnings: Vec<ConfigurationWarning>) -> Self {
        Self {
            warnings,
            ..Self::default()
        }
    }

    /// Records that a rule of `category` executed.
    pub fn rule_applied(&mut self, category: Category) {
        self.rules_applied += 1;
        self.categories.insert(category);
    }

    pub fn ingest(&mut self, findings: Vec<Finding>) {
        self.findings.extend(findings);
    }

    /// Sorts findings by severity (most severe first), category and rule id.
    /// The sort is stable, so ties keep discovery order.
    #[must_use]
    pub fn finish(mut self, elements_scanned: usize) -> Report {
        self.findings
            .sort_by(|a, b| {
                (Reverse(a.severity), a.category, &a.rule_id)
                    .cmp(&(Reverse(b.severity), b.category, &b.rule_id))
            });

        let mut by_category: BTreeMap<Category, usize> =
            self.categories.iter().map(|&c| (c, 0)).collect();
        let mut by_severity: BTreeMap<Severity, usize> =
            Severity::ALL.into_iter().map(|s| (s, 0)).collect();
        for f in &self.findings {
            *by_category.entry(f.category).or_default() += 1;
            *by_severity.entry(f.severity).or_default() += 1;
        }

        let scores = Scores::compute(&self.findings, &self.categories);
        Report {
            summary: Summary {
                total_findings: self.findings.len(),
                by_category,
                by_severity,
                warnings: self.warnings,
            },
            findings: self.findings,
            coverage: Coverage {
                elements_scanned,
                rules_applied: self.rules_applied,
            },
            scores,
        }
    }
}
