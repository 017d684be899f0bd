// src/rules/a11y_keyboard.rs
//! Keyboard operability: key pairs for click handlers, focus visibility,
//! tab order and pointer target size.

use super::{RuleInput, RuleResult};
use crate::extract::fact::KEY_HANDLERS;
use crate::extract::{px_value, AttrValue, ClassList, InlineStyle, StyleValue};
use crate::types::Severity;
use regex::Regex;
use std::sync::LazyLock;

static POSITIVE_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[1-9]\d*\b").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Minimum pointer target edge, in CSS pixels.
pub const MIN_TARGET_PX: f64 = 44.0;

fn is_focus_token(token: &str) -> bool {
    token.contains("focus") || token.starts_with("outline") || token.starts_with("ring")
}

/// Native, non-interactive tags with `onClick` but no keyboard path.
pub(super) fn click_without_keyboard_pair(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.interactive() {
        if !fact.has_handler("onClick") || fact.is_native_interactive() || fact.is_component() {
            continue;
        }
        let has_keys = fact.has_any_handler(KEY_HANDLERS);
        let focusable = fact.has_attr("tabIndex");
        if has_keys && focusable {
            continue;
        }
        if fact.spread {
            out.push(input.unverifiable(id, "Keyboard support (props are spread)"));
            continue;
        }
        let tag = &fact.tag;
        let finding = match (has_keys, focusable) {
            (false, false) => input.finding_at(
                id,
                Severity::High,
                format!("<{tag}> handles clicks but cannot be focused or operated with a keyboard"),
            ),
            (false, true) => input.finding_at(
                id,
                Severity::Medium,
                format!("<{tag}> is focusable but has no key handler for Enter/Space"),
            ),
            _ => input.finding_at(
                id,
                Severity::Medium,
                format!("<{tag}> has a key handler but no tabIndex, so it never receives focus"),
            ),
        };
        out.push(finding.with_fix(format!(
            "Use <button type=\"button\"> instead of <{tag}>, or add role=\"button\", tabIndex={{0}} and an onKeyDown handler for Enter and Space"
        )));
    }
    Ok(out)
}

/// Interactive elements with no focus style in class names or component CSS.
pub(super) fn missing_focus_visible(input: &RuleInput<'_>) -> RuleResult {
    if input.tree.script.css_focus_styles {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for (id, fact) in input.interactive() {
        if fact.is_component() || fact.literal("type") == Some("hidden") {
            continue;
        }
        let classes = ClassList::of(fact);
        if classes.any(is_focus_token) {
            continue;
        }
        if classes.dynamic && classes.tokens.is_empty() {
            out.push(input.unverifiable(id, "Focus styling (class names)"));
            continue;
        }
        out.push(
            input
                .finding_at(
                    id,
                    Severity::Medium,
                    format!("<{}> has no visible focus style", fact.tag),
                )
                .with_fix("Add a :focus-visible outline or ring (e.g. `focus-visible:ring-2`); never remove outlines without a replacement"),
        );
    }
    Ok(out)
}

/// `tabIndex` greater than zero.
pub(super) fn positive_tabindex(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        match fact.attr("tabIndex") {
            Some(AttrValue::Literal(v)) if v.trim().parse::<i64>().is_ok_and(|n| n > 0) => {
                out.push(
                    input
                        .finding_at(
                            id,
                            Severity::Medium,
                            format!("<{}> has tabIndex={v}, which overrides the natural tab order", fact.tag),
                        )
                        .with_fix("Use tabIndex={0} and reorder the markup instead"),
                );
            }
            Some(AttrValue::Dynamic(expr)) if POSITIVE_INT_RE.is_match(expr) => {
                out.push(input.unverifiable(id, "tabIndex"));
            }
            _ => {}
        }
    }
    Ok(out)
}

enum Edge {
    Small(&'static str, f64),
    Unknown,
}

/// First of `props` that is set, as pixels; `Err` when it is a runtime value.
fn edge_px(style: &InlineStyle, props: &[&str]) -> Option<Result<f64, String>> {
    props.iter().find_map(|p| match style.get(p)? {
        StyleValue::Literal(v) => px_value(v).map(Ok),
        StyleValue::Dynamic(expr) => Some(Err(expr.clone())),
    })
}

fn small_edge(style: &InlineStyle) -> Option<Edge> {
    for (axis, props) in [
        ("width", ["min-width", "width"]),
        ("height", ["min-height", "height"]),
    ] {
        match edge_px(style, &props) {
            Some(Ok(px)) if px < MIN_TARGET_PX => return Some(Edge::Small(axis, px)),
            Some(Err(_)) => return Some(Edge::Unknown),
            _ => {}
        }
    }
    None
}

/// Interactive elements whose inline size is below the AAA target minimum.
pub(super) fn target_size(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.interactive() {
        if fact.is_component() {
            continue;
        }
        match small_edge(&InlineStyle::of(fact)) {
            Some(Edge::Small(axis, px)) => out.push(
                input
                    .finding_at(
                        id,
                        Severity::Medium,
                        format!(
                            "<{}> target {axis} is {px}px; AAA expects at least {MIN_TARGET_PX}px",
                            fact.tag
                        ),
                    )
                    .with_fix("Increase the hit area to 44x44px with padding or min-width/min-height"),
            ),
            Some(Edge::Unknown) => out.push(input.unverifiable(id, "Target size")),
            None => {}
        }
    }
    Ok(out)
}
