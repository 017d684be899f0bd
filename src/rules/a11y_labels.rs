// src/rules/a11y_labels.rs
//! Accessible names: icon-only controls, images, form controls.

use super::{RuleInput, RuleResult};
use crate::extract::{AttrValue, ElementFact, FactTree, NodeId};
use crate::types::Severity;

#[cfg(test)]
#[path = "a11y_labels_test.rs"]
mod tests;

/// Attributes that give an element an accessible name on their own.
pub(super) const NAME_ATTRS: &[&str] = &["aria-label", "aria-labelledby", "title"];

/// Input types that are labelled by their own value or are not rendered.
const SELF_LABELLED_INPUTS: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// A non-empty literal or any runtime value.
fn is_present(value: Option<&AttrValue>) -> bool {
    match value {
        Some(AttrValue::Literal(s)) => !s.trim().is_empty(),
        Some(AttrValue::Dynamic(_)) => true,
        Some(AttrValue::Flag(_)) | None => false,
    }
}

pub(super) fn has_accessible_name(fact: &ElementFact) -> bool {
    NAME_ATTRS.iter().any(|n| is_present(fact.attr(n)))
}

/// `id` or any descendant provides text, an accessible name, or alt text.
pub(super) fn subtree_has_name(tree: &FactTree, id: NodeId) -> bool {
    std::iter::once(id).chain(tree.descendants(id)).any(|n| {
        let fact = tree.node(n);
        fact.has_text_content()
            || has_accessible_name(fact)
            || (fact.tag == "img" && is_present(fact.attr("alt")))
    })
}

fn is_form_control(fact: &ElementFact) -> bool {
    match fact.tag.as_str() {
        "select" | "textarea" => true,
        "input" => !fact
            .literal("type")
            .is_some_and(|t| SELF_LABELLED_INPUTS.contains(&t.to_ascii_lowercase().as_str())),
        _ => false,
    }
}

/// Interactive elements whose only content is non-text children.
pub(super) fn icon_button_missing_label(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.interactive() {
        if fact.is_component() || matches!(fact.tag.as_str(), "input" | "select" | "textarea") {
            continue;
        }
        if has_accessible_name(fact) || subtree_has_name(input.tree, id) {
            continue;
        }
        if fact.spread {
            out.push(input.unverifiable(id, "Accessible name (props are spread)"));
            continue;
        }
        let what = if fact.children.is_empty() {
            "has no content"
        } else {
            "contains only non-text content"
        };
        out.push(
            input
                .finding_at(
                    id,
                    Severity::High,
                    format!("<{}> {what} and no aria-label, aria-labelledby or title", fact.tag),
                )
                .with_fix(format!(
                    "Add aria-label describing the action, e.g. <{} aria-label=\"Close dialog\">",
                    fact.tag
                )),
        );
    }
    Ok(out)
}

/// `img` without an `alt` attribute.
pub(super) fn image_without_alt(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.by_tag("img") {
        if fact.has_attr("alt") {
            continue;
        }
        if fact.spread {
            out.push(input.unverifiable(id, "`alt` (props are spread)"));
            continue;
        }
        let decorative = fact
            .literal("role")
            .is_some_and(|r| r == "presentation" || r == "none")
            || matches!(
                fact.attr("aria-hidden"),
                Some(AttrValue::Flag(true))
            )
            || fact.literal("aria-hidden") == Some("true");
        let finding = if decorative {
            input.finding_at(
                id,
                Severity::Low,
                "Decorative <img> has no alt attribute; some screen readers still announce the file name",
            )
        } else {
            input.finding_at(id, Severity::High, "<img> has no alt attribute")
        };
        out.push(finding.with_fix(
            "Describe the image with alt=\"...\", or use alt=\"\" if it is purely decorative",
        ));
    }
    Ok(out)
}

/// Form controls with no label association or accessible name.
pub(super) fn input_without_label(input: &RuleInput<'_>) -> RuleResult {
    let tree = input.tree;
    let label_targets: Vec<&AttrValue> = tree
        .by_tag("label")
        .iter()
        .filter_map(|&l| {
            let label = tree.node(l);
            label.attr("htmlFor").or_else(|| label.attr("for"))
        })
        .collect();
    let dynamic_labels = label_targets.iter().any(|v| v.is_dynamic());

    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        if !is_form_control(fact) || has_accessible_name(fact) {
            continue;
        }
        if tree.ancestors(id).any(|a| tree.node(a).tag == "label") {
            continue;
        }
        let labelled_by_for = match fact.attr("id") {
            Some(AttrValue::Literal(control)) => label_targets
                .iter()
                .any(|t| t.literal() == Some(control.as_str())),
            _ => false,
        };
        if labelled_by_for {
            continue;
        }
        if fact.spread || (dynamic_labels && fact.has_attr("id")) {
            out.push(input.unverifiable(id, "Label association"));
            continue;
        }
        let mut message = format!("<{}> has no associated label", fact.tag);
        if fact.has_attr("placeholder") {
            message.push_str("; a placeholder is not a label");
        }
        out.push(
            input
                .finding_at(id, Severity::Medium, message)
                .with_fix("Wrap the control in <label>, point <label htmlFor> at its id, or add aria-label"),
        );
    }
    Ok(out)
}
