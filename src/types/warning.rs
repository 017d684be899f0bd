use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Configuration names a rule id that is not registered.
    UnknownRule,
    /// A threshold outside its valid range; the default was used instead.
    OutOfRange,
    /// Breakpoints were not strictly increasing and have been normalized.
    UnorderedBreakpoints,
}

/// Advisory problem with the run's configuration. Never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl ConfigurationWarning {
    #[must_use]
    pub fn unknown_rule(id: &str) -> Self {
        Self {
            kind: WarningKind::UnknownRule,
            message: format!("Unknown rule id `{id}` in configuration (ignored)"),
        }
    }

    #[must_use]
    pub fn out_of_range(field: &str, value: impl fmt::Display, fallback: impl fmt::Display) -> Self {
        Self {
            kind: WarningKind::OutOfRange,
            message: format!("`{field}` = {value} is out of range; using {fallback}"),
        }
    }

    #[must_use]
    pub fn unordered_breakpoints(given: &[u32], normalized: &[u32]) -> Self {
        Self {
            kind: WarningKind::UnorderedBreakpoints,
            message: format!(
                "`target_breakpoints` {given:?} must be strictly increasing; using {normalized:?}"
            ),
        }
    }
}

impl fmt::Display for ConfigurationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
