// src/rules/mod.rs
//! Rule engine: an open registry of stateless detectors over a fact tree.

pub mod a11y_contrast;
pub mod a11y_keyboard;
pub mod a11y_labels;
mod input;
pub mod performance;
pub mod registry;
pub mod responsive;
pub mod ux;

#[cfg(test)]
pub(crate) mod test_support;

pub use input::RuleInput;
pub use registry::BUILTIN;

use crate::config::{AnalysisContext, WcagLevel};
use crate::error::InvalidColorError;
use crate::types::{Category, Finding, Severity};
use serde::Serialize;
use std::fmt;

/// What a rule's detector returns. Only color math can fail.
pub type RuleResult = Result<Vec<Finding>, InvalidColorError>;

pub type EvalFn = fn(&RuleInput<'_>) -> RuleResult;

/// Context flag a rule depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    Always,
    /// Runs only with `require_aria_support`.
    Aria,
    /// Runs only with `require_keyboard_nav`.
    Keyboard,
}

/// A registered detector.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable id, e.g. `a11y.image-without-alt`.
    pub id: &'static str,
    pub category: Category,
    /// `Some(AAA)` marks a rule that only runs for AAA targets.
    pub level: Option<WcagLevel>,
    pub gate: Gate,
    /// WCAG success criterion the rule checks, if any.
    pub wcag: Option<&'static str>,
    /// Typical severity, for listings. Findings carry their own.
    pub severity: Severity,
    pub summary: &'static str,
    pub rationale: &'static str,
    pub evaluate: EvalFn,
}

impl Rule {
    /// Whether this rule takes part in a run with `ctx`.
    #[must_use]
    pub fn applies(&self, ctx: &AnalysisContext) -> bool {
        if !ctx.focus.includes(self.category) {
            return false;
        }
        if self.level == Some(WcagLevel::AAA) && ctx.wcag_level != WcagLevel::AAA {
            return false;
        }
        match self.gate {
            Gate::Always => true,
            Gate::Aria => ctx.require_aria_support,
            Gate::Keyboard => ctx.require_keyboard_nav,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("level", &self.level)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// Ordered rule set. Registration order is execution order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// A registry with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in catalog, in its canonical order.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN.to_vec(),
        }
    }

    /// Adds `rule` at the end. A rule with the same id is replaced in place
    /// and returned.
    pub fn register(&mut self, rule: Rule) -> Option<Rule> {
        if let Some(slot) = self.rules.iter_mut().find(|r| r.id == rule.id) {
            return Some(std::mem::replace(slot, rule));
        }
        self.rules.push(rule);
        None
    }

    pub fn remove(&mut self, id: &str) -> Option<Rule> {
        let pos = self.rules.iter().position(|r| r.id == id)?;
        Some(self.rules.remove(pos))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleRegistry {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Focus;
    use std::collections::HashSet;

    fn noop(_: &RuleInput<'_>) -> RuleResult {
        Ok(Vec::new())
    }

    fn custom(id: &'static str) -> Rule {
        Rule {
            id,
            category: Category::Ux,
            level: None,
            gate: Gate::Always,
            wcag: None,
            severity: Severity::Low,
            summary: "custom",
            rationale: "custom",
            evaluate: noop,
        }
    }

    #[test]
    fn builtin_ids_are_unique_and_prefixed() {
        let mut seen = HashSet::new();
        for rule in BUILTIN {
            assert!(seen.insert(rule.id), "duplicate id {}", rule.id);
            let prefix = match rule.category {
                Category::Accessibility => "a11y.",
                Category::Responsive => "responsive.",
                Category::Performance => "perf.",
                Category::Ux => "ux.",
            };
            assert!(rule.id.starts_with(prefix), "{} has wrong prefix", rule.id);
        }
    }

    #[test]
    fn register_appends_and_replaces_in_place() {
        let mut reg = RuleRegistry::empty();
        assert!(reg.register(custom("ux.a")).is_none());
        assert!(reg.register(custom("ux.b")).is_none());
        let mut replacement = custom("ux.a");
        replacement.summary = "replaced";
        assert!(reg.register(replacement).is_some());

        let ids: Vec<_> = reg.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["ux.a", "ux.b"]);
        assert_eq!(reg.get("ux.a").map(|r| r.summary), Some("replaced"));
    }

    #[test]
    fn remove_and_lookup() {
        let mut reg = RuleRegistry::builtin();
        let before = reg.len();
        assert!(reg.remove("a11y.image-without-alt").is_some());
        assert!(reg.remove("a11y.image-without-alt").is_none());
        assert_eq!(reg.len(), before - 1);
        assert!(!reg.contains("a11y.image-without-alt"));
        assert!(reg.contains("ux.missing-state-coverage"));
    }

    #[test]
    fn applies_respects_focus_level_and_gates() {
        let rule = custom("ux.a");
        let ctx = AnalysisContext::default();
        assert!(rule.applies(&ctx));
        assert!(!rule.applies(&ctx.clone().with_focus(Focus::Performance)));

        let mut aaa = custom("ux.aaa");
        aaa.level = Some(WcagLevel::AAA);
        assert!(!aaa.applies(&ctx));
        assert!(aaa.applies(&ctx.clone().with_wcag_level(WcagLevel::AAA)));

        let mut keyed = custom("ux.keys");
        keyed.gate = Gate::Keyboard;
        let mut no_keys = ctx.clone();
        no_keys.require_keyboard_nav = false;
        assert!(keyed.applies(&ctx));
        assert!(!keyed.applies(&no_keys));
    }
}
