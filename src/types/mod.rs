// src/types/mod.rs
//! Findings and the vocabulary shared by rules, the engine and reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod warning;
pub use warning::{ConfigurationWarning, WarningKind};

/// Which family of problems a finding belongs to.
///
/// Declaration order is the report's category order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Accessibility,
    Responsive,
    Performance,
    Ux,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Accessibility,
        Self::Responsive,
        Self::Performance,
        Self::Ux,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accessibility => "accessibility",
            Self::Responsive => "responsive",
            Self::Performance => "performance",
            Self::Ux => "ux",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently a finding should be addressed.
///
/// Ordered from least to most severe so `Ord` can drive the report sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Critical and high findings block a CI gate.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        self >= Self::High
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("Unknown severity: {other}")),
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub severity: Severity,
    pub rule_id: String,
    pub message: String,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_hint: Option<String>,
    /// WCAG success criterion, e.g. `1.1.1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcag: Option<String>,
}

impl Finding {
    #[must_use]
    pub fn new(
        rule_id: &str,
        category: Category,
        severity: Severity,
        message: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            rule_id: rule_id.to_string(),
            message: message.into(),
            rationale: rationale.into(),
            fix_suggestion: None,
            location_hint: None,
            wcag: None,
        }
    }

    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix_suggestion = Some(fix.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, hint: impl Into<String>) -> Self {
        self.location_hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_wcag(mut self, criterion: &str) -> Self {
        self.wcag = Some(criterion.to_string());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn only_high_and_critical_block() {
        assert!(Severity::Critical.is_blocking());
        assert!(Severity::High.is_blocking());
        assert!(!Severity::Medium.is_blocking());
        assert!(!Severity::Low.is_blocking());
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Severity>(), Ok(Severity::High));
        assert!("warn".parse::<Severity>().is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Ux).unwrap();
        assert_eq!(json, "\"ux\"");
    }
}
