// src/rules/performance.rs
//! Rendering performance: list keys, long lists, per-item closures,
//! memoization and bundle weight.

use super::{RuleInput, RuleResult};
use crate::extract::{AttrValue, ListBound};
use crate::types::Severity;
use std::collections::BTreeSet;

#[cfg(test)]
#[path = "performance_test.rs"]
mod tests;

/// Bounded lists at or above this size still want windowing.
pub const VIRTUALIZE_AT: usize = 100;

/// Modules that already window their rows.
const VIRTUALIZERS: &[&str] = &[
    "react-window",
    "react-virtualized",
    "react-virtuoso",
    "@tanstack/react-virtual",
    "@tanstack/virtual-core",
];

/// Packages heavy enough to belong behind a dynamic import.
const HEAVY_MODULES: &[&str] = &[
    "moment",
    "lodash",
    "chart.js",
    "d3",
    "three",
    "xlsx",
    "pdfjs-dist",
    "monaco-editor",
    "mapbox-gl",
    "@mui/icons-material",
    "react-pdf",
    "highlight.js",
];

/// Expressions that produce a new key on every render.
const UNSTABLE_KEYS: &[&str] = &["Math.random", "Date.now", "uuid(", "nanoid("];

/// Top-level elements of `.map` callbacks without a usable `key`.
pub(super) fn list_without_key(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        let Some(it) = &fact.iteration else {
            continue;
        };
        let tag = if fact.is_fragment() { "Fragment" } else { fact.tag.as_str() };
        let finding = match fact.attr("key") {
            None if fact.spread => Some(input.unverifiable(id, "List key (props are spread)")),
            None => Some(
                input
                    .finding_at(
                        id,
                        Severity::Medium,
                        format!("<{tag}> rendered from `{}.map` has no key", it.receiver),
                    )
                    .with_fix(if fact.is_fragment() {
                        "Use <Fragment key={item.id}> instead of <>".to_string()
                    } else {
                        format!("Add a stable key, e.g. <{tag} key={{item.id}}>")
                    }),
            ),
            Some(AttrValue::Dynamic(expr)) if UNSTABLE_KEYS.iter().any(|u| expr.contains(u)) => Some(
                input
                    .finding_at(
                        id,
                        Severity::Medium,
                        format!("<{tag}> key `{expr}` changes on every render"),
                    )
                    .with_fix("Key list items by a stable id from the data"),
            ),
            Some(AttrValue::Dynamic(expr)) if it.index_param.as_deref() == Some(expr.trim()) => Some(
                input
                    .finding_at(
                        id,
                        Severity::Low,
                        format!("<{tag}> uses the array index `{expr}` as key"),
                    )
                    .with_fix("Index keys break state when items are inserted or reordered; key by a stable id"),
            ),
            Some(AttrValue::Literal(v)) => Some(
                input
                    .finding_at(
                        id,
                        Severity::Medium,
                        format!("<{tag}> has the constant key \"{v}\"; every item shares it"),
                    )
                    .with_fix("Key list items by a stable id from the data"),
            ),
            _ => None,
        };
        out.extend(finding);
    }
    Ok(out)
}

/// Unbounded or long lists rendered without windowing.
pub(super) fn list_virtualization(input: &RuleInput<'_>) -> RuleResult {
    if !input.ctx.lazy_loading_enabled {
        return Ok(Vec::new());
    }
    let script = &input.tree.script;
    if script.imports.iter().any(|m| VIRTUALIZERS.contains(&m.as_str())) {
        return Ok(Vec::new());
    }
    let budget = input.ctx.performance_budget_ms;
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        let Some(it) = &fact.iteration else {
            continue;
        };
        if !seen.insert(it.receiver.as_str()) {
            continue;
        }
        let size = match it.bound {
            ListBound::Unbounded => "an unbounded number of".to_string(),
            ListBound::Bounded(n) if n >= VIRTUALIZE_AT => n.to_string(),
            ListBound::Bounded(_) => continue,
        };
        out.push(
            input
                .finding_at(
                    id,
                    Severity::Low,
                    format!(
                        "`{}.map` renders {size} rows at once; long lists can exceed the {budget}ms budget",
                        it.receiver
                    ),
                )
                .with_fix("Window the list with react-window or @tanstack/react-virtual, or paginate it"),
        );
    }
    Ok(out)
}

fn is_inline_closure(expr: &str) -> bool {
    expr.contains("=>") || expr.trim_start().starts_with("function")
}

/// Arrow functions created per item inside iterated markup.
pub(super) fn inline_handler_in_list(input: &RuleInput<'_>) -> RuleResult {
    let tree = input.tree;
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        if fact.handlers.is_empty() || tree.iteration_of(id).is_none() {
            continue;
        }
        let inline: Vec<&str> = fact
            .handlers
            .iter()
            .filter(|h| fact.attr(h).and_then(AttrValue::expression).is_some_and(is_inline_closure))
            .map(String::as_str)
            .collect();
        if inline.is_empty() {
            continue;
        }
        out.push(
            input
                .finding_at(
                    id,
                    Severity::Low,
                    format!("<{}> creates new {} closure(s) for every list item", fact.tag, inline.join("/")),
                )
                .with_fix("Hoist the handler with useCallback and pass the item id via a data attribute or a memoized row component"),
        );
    }
    Ok(out)
}

/// Exported components that render lists but are not wrapped in `memo`.
pub(super) fn unmemoized_list_component(input: &RuleInput<'_>) -> RuleResult {
    let script = &input.tree.script;
    if script.memoized || script.exported_components.is_empty() {
        return Ok(Vec::new());
    }
    let Some((id, _)) = input.elements().find(|(_, f)| f.iteration.is_some()) else {
        return Ok(Vec::new());
    };
    let names = script.exported_components.join(", ");
    Ok(vec![input
        .finding_at(
            id,
            Severity::Low,
            format!("{names} renders a list but is not wrapped in React.memo"),
        )
        .with_fix("Wrap the component in React.memo so unchanged props skip re-rendering the list")])
}

/// Heavy packages imported statically when code splitting is available.
pub(super) fn heavy_static_import(input: &RuleInput<'_>) -> RuleResult {
    if !input.ctx.code_splitting_enabled {
        return Ok(Vec::new());
    }
    let budget = input.ctx.performance_budget_ms;
    Ok(input
        .tree
        .script
        .imports
        .iter()
        .filter(|m| HEAVY_MODULES.contains(&m.as_str()))
        .map(|m| {
            input
                .finding(
                    Severity::Low,
                    format!("`{m}` is imported statically and adds to the initial bundle (budget {budget}ms)"),
                )
                .with_fix(format!(
                    "Load it on demand with React.lazy or `await import('{m}')`, or import only the functions you use"
                ))
        })
        .collect())
}
