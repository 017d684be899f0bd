// src/rules/ux.rs
//! UX patterns: async state coverage and form feedback.

use super::{RuleInput, RuleResult};
use crate::types::Severity;

/// Hooks that hand the loading state to a Suspense boundary.
const SUSPENSE_HOOKS: &[&str] = &["useSuspenseQuery", "useLoaderData"];

const FORM_CONTROLS: &[&str] = &["input", "select", "textarea"];

/// Data-fetching components that never branch on loading, error or empty.
pub(super) fn missing_state_coverage(input: &RuleInput<'_>) -> RuleResult {
    let script = &input.tree.script;
    if !script.fetches_data() {
        return Ok(Vec::new());
    }
    let suspense = script
        .fetch_hooks
        .iter()
        .all(|h| SUSPENSE_HOOKS.contains(&h.as_str()));
    let missing: Vec<&str> = script
        .missing_states()
        .into_iter()
        .filter(|s| !(suspense && *s == "loading"))
        .collect();
    if missing.is_empty() {
        return Ok(Vec::new());
    }
    let hooks = script.fetch_hooks.join(", ");
    let severity = if missing.len() == 3 {
        Severity::Medium
    } else {
        Severity::Low
    };
    Ok(vec![input
        .finding(
            severity,
            format!("Fetches data ({hooks}) but renders no {} state", missing.join("/")),
        )
        .with_fix("Render a skeleton while loading, an error message with retry, and an empty-state message")])
}

/// Forms with controls but no error, invalid or live-region signal.
pub(super) fn form_without_validation_feedback(input: &RuleInput<'_>) -> RuleResult {
    let tree = input.tree;
    let anchor = tree
        .by_tag("form")
        .first()
        .copied()
        .or_else(|| FORM_CONTROLS.iter().find_map(|t| tree.by_tag(t).first().copied()));
    let Some(anchor) = anchor else {
        return Ok(Vec::new());
    };
    let has_controls = FORM_CONTROLS.iter().any(|t| !tree.by_tag(t).is_empty());
    let standalone = tree.by_tag("form").is_empty();
    if !has_controls || (standalone && !tree.node(anchor).has_handler("onChange")) {
        return Ok(Vec::new());
    }

    let mut signalled = tree.script.mentions_validation;
    for (_, fact) in input.elements() {
        let live = fact
            .literal("role")
            .is_some_and(|r| r == "alert" || r == "status")
            || fact.has_attr("aria-live");
        if live || fact.has_any_attr(&["aria-invalid", "aria-errormessage", "aria-describedby"]) {
            signalled = true;
        }
    }
    if signalled {
        return Ok(Vec::new());
    }
    Ok(vec![input
        .finding_at(
            anchor,
            Severity::Medium,
            "Form has no validation feedback: no error text, aria-invalid or live region",
        )
        .with_fix("Mark bad fields with aria-invalid, link messages with aria-describedby, and announce errors with role=\"alert\"")])
}
