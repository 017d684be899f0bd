// src/rules/input.rs
use super::Rule;
use crate::config::AnalysisContext;
use crate::extract::{ElementFact, FactTree, NodeId};
use crate::types::{Finding, Severity};
use std::cell::RefCell;
use std::collections::BTreeSet;

/// Everything a rule may read during one evaluation.
///
/// Element accessors record which nodes the rule looked at, for the
/// report's coverage figures.
pub struct RuleInput<'a> {
    pub tree: &'a FactTree,
    pub ctx: &'a AnalysisContext,
    rule: &'a Rule,
    visited: &'a RefCell<BTreeSet<NodeId>>,
}

impl<'a> RuleInput<'a> {
    #[must_use]
    pub fn new(
        tree: &'a FactTree,
        ctx: &'a AnalysisContext,
        rule: &'a Rule,
        visited: &'a RefCell<BTreeSet<NodeId>>,
    ) -> Self {
        Self {
            tree,
            ctx,
            rule,
            visited,
        }
    }

    #[must_use]
    pub fn rule(&self) -> &Rule {
        self.rule
    }

    pub fn visit(&self, id: NodeId) {
        self.visited.borrow_mut().insert(id);
    }

    /// Every element, in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &'a ElementFact)> + '_ {
        let tree = self.tree;
        tree.elements().inspect(move |(id, _)| self.visit(*id))
    }

    /// Elements with the given tag, in document order.
    pub fn by_tag(&self, tag: &str) -> impl Iterator<Item = (NodeId, &'a ElementFact)> + '_ {
        let tree = self.tree;
        tree.by_tag(tag).iter().map(move |&id| {
            self.visit(id);
            (id, tree.node(id))
        })
    }

    /// Elements in the interactive index, in document order.
    pub fn interactive(&self) -> impl Iterator<Item = (NodeId, &'a ElementFact)> + '_ {
        let tree = self.tree;
        tree.interactive().iter().map(move |&id| {
            self.visit(id);
            (id, tree.node(id))
        })
    }

    /// A finding pre-filled with this rule's id, category, rationale and
    /// WCAG criterion.
    #[must_use]
    pub fn finding(&self, severity: Severity, message: impl Into<String>) -> Finding {
        let finding = Finding::new(
            self.rule.id,
            self.rule.category,
            severity,
            message,
            self.rule.rationale,
        );
        match self.rule.wcag {
            Some(sc) => finding.with_wcag(sc),
            None => finding,
        }
    }

    /// Like [`finding`](Self::finding), located at element `id`.
    #[must_use]
    pub fn finding_at(&self, id: NodeId, severity: Severity, message: impl Into<String>) -> Finding {
        self.finding(severity, message)
            .with_location(self.tree.path(id))
    }

    /// A low finding for a check that depends on a value only known at runtime.
    #[must_use]
    pub fn unverifiable(&self, id: NodeId, what: &str) -> Finding {
        self.finding_at(
            id,
            Severity::Low,
            format!("{what} is computed at runtime; unverifiable, manual check required"),
        )
    }
}
