//! Runs the selected rules over one component and hands their findings to
//! the report aggregator.

use std::cell::RefCell;
use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::{AnalysisContext, Config, RuleConfig};
use crate::error::{AnalysisError, InvalidColorError, Result};
use crate::extract::{self, FactTree};
use crate::report::{Aggregator, Report};
use crate::rules::{Rule, RuleInput, RuleRegistry};
use crate::types::{ConfigurationWarning, Finding, Severity};

/// The analysis orchestrator.
/// Owns the rule registry and the per-rule configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: RuleRegistry,
    rules: RuleConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RuleRegistry::builtin(), RuleConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(registry: RuleRegistry, rules: RuleConfig) -> Self {
        Self { registry, rules }
    }

    /// Built-in rules with the `[rules]` table from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(RuleRegistry::builtin(), config.rules.clone())
    }

    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn rule_config(&self) -> &RuleConfig {
        &self.rules
    }

    /// Analyzes one component.
    ///
    /// # Errors
    /// Returns `AnalysisError::Parse` on malformed source, and
    /// `AnalysisError::InvalidColor` when `strict_colors` is set and a rule
    /// meets a color literal it cannot parse.
    pub fn analyze(&self, source: &str, ctx: &AnalysisContext) -> Result<Report> {
        let tree = extract::extract(source)?;

        let (ctx, mut warnings) = ctx.normalized();
        warnings.extend(self.unknown_rule_warnings());
        for w in &warnings {
            warn!("{w}");
        }

        let visited = RefCell::new(BTreeSet::new());
        let mut agg = Aggregator::new(warnings);

        for rule in &self.registry {
            if self.rules.disabled.iter().any(|id| id == rule.id) {
                debug!(rule = rule.id, "skipped: disabled in configuration");
                continue;
            }
            if !rule.applies(&ctx) {
                debug!(rule = rule.id, "skipped: not selected by context");
                continue;
            }
            agg.rule_applied(rule.category);
            let findings = self.run_rule(rule, &tree, &ctx, &visited)?;
            debug!(rule = rule.id, findings = findings.len(), "executed");
            agg.ingest(findings);
        }

        Ok(agg.finish(visited.into_inner().len()))
    }

    fn run_rule(
        &self,
        rule: &Rule,
        tree: &FactTree,
        ctx: &AnalysisContext,
        visited: &RefCell<BTreeSet<extract::NodeId>>,
    ) -> Result<Vec<Finding>> {
        let input = RuleInput::new(tree, ctx, rule, visited);
        match (rule.evaluate)(&input) {
            Ok(findings) => Ok(self.apply_overrides(rule, findings)),
            Err(source) if self.rules.strict_colors => Err(AnalysisError::InvalidColor {
                rule_id: rule.id,
                source,
            }),
            Err(e) => {
                warn!(rule = rule.id, "{e}; downgraded to an unverifiable finding");
                Ok(vec![unverifiable_color(rule, &e)])
            }
        }
    }

    fn apply_overrides(&self, rule: &Rule, findings: Vec<Finding>) -> Vec<Finding> {
        match self.rules.severity.get(rule.id) {
            Some(&sev) => findings.into_iter().map(|f| f.with_severity(sev)).collect(),
            None => findings,
        }
    }

    fn unknown_rule_warnings(&self) -> Vec<ConfigurationWarning> {
        let mut seen = BTreeSet::new();
        self.rules
            .disabled
            .iter()
            .chain(self.rules.severity.keys())
            .filter(|id| !self.registry.contains(id))
            .filter(|id| seen.insert(id.as_str()))
            .map(|id| ConfigurationWarning::unknown_rule(id))
            .collect()
    }
}

fn unverifiable_color(rule: &Rule, err: &InvalidColorError) -> Finding {
    let finding = Finding::new(
        rule.id,
        rule.category,
        Severity::Low,
        format!("Unverifiable color: {err}; manual check required"),
        rule.rationale,
    );
    match rule.wcag {
        Some(sc) => finding.with_wcag(sc),
        None => finding,
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
