// src/report/scoring.rs
//! Per-category scores and the overall letter grade.

use crate::types::{Category, Finding, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Points deducted from a category's 100 for one finding.
#[must_use]
pub fn penalty(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 25,
        Severity::High => 15,
        Severity::Medium => 8,
        Severity::Low => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::A,
            80..=89 => Self::B,
            70..=79 => Self::C,
            60..=69 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(s)
    }
}

/// Scores for the categories that ran. Categories filtered out by focus
/// have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub by_category: BTreeMap<Category, u8>,
    pub overall: u8,
    pub grade: Grade,
}

impl Scores {
    #[must_use]
    pub fn compute(findings: &[Finding], ran: &BTreeSet<Category>) -> Self {
        let mut deducted: BTreeMap<Category, u32> = ran.iter().map(|&c| (c, 0)).collect();
        for f in findings {
            if let Some(total) = deducted.get_mut(&f.category) {
                *total += penalty(f.severity);
            }
        }

        let by_category: BTreeMap<Category, u8> = deducted
            .into_iter()
            .map(|(c, d)| (c, clamp_score(d)))
            .collect();

        let overall = if by_category.is_empty() {
            100
        } else {
            let sum: u32 = by_category.values().map(|&s| u32::from(s)).sum();
            let count = u32::try_from(by_category.len()).unwrap_or(u32::MAX);
            u8::try_from(sum / count).unwrap_or(100)
        };

        Self {
            by_category,
            overall,
            grade: Grade::from_score(overall),
        }
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Option<u8> {
        self.by_category.get(&category).copied()
    }
}

fn clamp_score(deducted: u32) -> u8 {
    u8::try_from(100u32.saturating_sub(deducted)).unwrap_or(0)
}
