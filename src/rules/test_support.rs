//! Runs single built-in rules against inline sources.

use super::{RuleInput, BUILTIN};
use crate::config::AnalysisContext;
use crate::extract::extract;
use crate::types::Finding;
use std::cell::RefCell;
use std::collections::BTreeSet;

pub(crate) fn run_rule_with(id: &str, src: &str, ctx: &AnalysisContext) -> Vec<Finding> {
    let tree = extract(src).unwrap_or_else(|e| panic!("fixture does not parse: {e}"));
    let rule = BUILTIN
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("no built-in rule {id}"));
    let visited = RefCell::new(BTreeSet::new());
    let input = RuleInput::new(&tree, ctx, rule, &visited);
    (rule.evaluate)(&input).unwrap_or_else(|e| panic!("rule {id} failed: {e}"))
}

pub(crate) fn run_rule(id: &str, src: &str) -> Vec<Finding> {
    run_rule_with(id, src, &AnalysisContext::default())
}
