// src/rules/a11y_contrast.rs
//! Color: inline text contrast and color-only state signals.

use super::a11y_labels::has_accessible_name;
use super::{RuleInput, RuleResult};
use crate::config::WcagLevel;
use crate::contrast::{compute_contrast, threshold, Color, TextSize};
use crate::error::InvalidColorError;
use crate::extract::{px_value, ClassList, ElementFact, FactTree, InlineStyle, NodeId, StyleValue};
use crate::types::Severity;
use regex::Regex;
use std::sync::LazyLock;

static SEMANTIC_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[\w-]+:)*(?:is-|has-)?(?:(?:text|bg|border|fill|stroke|ring)-)?(?:red|green|rose|emerald|error|success|danger|warning|destructive|invalid|valid)(?:-\d{2,3})?$",
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Values that defer to the surrounding paint.
const INHERITED: &[&str] = &["transparent", "inherit", "currentcolor", "initial", "unset", "none"];

const DEFAULT_FONT_PX: f64 = 16.0;

enum Paint {
    Color(Color),
    Runtime,
    Unset,
}

/// First set paint among `props`. Background shorthands are read by their
/// leading token; images and gradients count as runtime paint.
fn paint(style: &InlineStyle, props: &[&str]) -> Result<Paint, InvalidColorError> {
    for prop in props {
        match style.get(prop) {
            None => {}
            Some(StyleValue::Dynamic(_)) => return Ok(Paint::Runtime),
            Some(StyleValue::Literal(v)) => {
                let token = v.split_whitespace().next().unwrap_or("");
                if INHERITED.contains(&token.to_ascii_lowercase().as_str()) {
                    continue;
                }
                let colorish = token.starts_with('#') || token.chars().all(|c| c.is_ascii_alphabetic());
                if !colorish && *prop == "background" {
                    return Ok(Paint::Runtime);
                }
                return Color::parse(token).map(Paint::Color);
            }
        }
    }
    Ok(Paint::Unset)
}

/// Nearest background on `id` or its ancestors.
fn background(tree: &FactTree, id: NodeId) -> Result<Paint, InvalidColorError> {
    for n in std::iter::once(id).chain(tree.ancestors(id)) {
        match paint(&InlineStyle::of(tree.node(n)), &["background-color", "background"])? {
            Paint::Unset => {}
            found => return Ok(found),
        }
    }
    Ok(Paint::Unset)
}

fn is_bold(weight: &str) -> bool {
    matches!(weight.trim(), "bold" | "bolder") || weight.trim().parse::<u32>().is_ok_and(|w| w >= 700)
}

/// Rendered text size from inline styles, falling back to heading defaults.
fn text_size(tree: &FactTree, id: NodeId) -> TextSize {
    let mut px = None;
    let mut bold = None;
    for n in std::iter::once(id).chain(tree.ancestors(id)) {
        let fact = tree.node(n);
        let style = InlineStyle::of(fact);
        if px.is_none() {
            px = style
                .get("font-size")
                .and_then(StyleValue::literal)
                .and_then(px_value)
                .or_else(|| heading_px(&fact.tag));
        }
        if bold.is_none() {
            bold = style
                .get("font-weight")
                .and_then(StyleValue::literal)
                .map(is_bold)
                .or_else(|| heading_px(&fact.tag).map(|_| true));
        }
    }
    TextSize::from_px(px.unwrap_or(DEFAULT_FONT_PX), bold.unwrap_or(false))
}

fn heading_px(tag: &str) -> Option<f64> {
    match tag {
        "h1" => Some(32.0),
        "h2" => Some(24.0),
        "h3" => Some(18.72),
        "h4" => Some(16.0),
        "h5" => Some(13.28),
        "h6" => Some(10.72),
        _ => None,
    }
}

fn has_text(tree: &FactTree, id: NodeId) -> bool {
    std::iter::once(id)
        .chain(tree.descendants(id))
        .any(|n| tree.node(n).has_text_content())
}

/// Inline foreground/background pairs below the run's contrast threshold.
pub(super) fn insufficient_contrast(input: &RuleInput<'_>) -> RuleResult {
    let tree = input.tree;
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        let fg = match paint(&InlineStyle::of(fact), &["color"])? {
            Paint::Unset => continue,
            Paint::Runtime => {
                out.push(input.unverifiable(id, "Text color"));
                continue;
            }
            Paint::Color(c) => c,
        };
        if !has_text(tree, id) {
            continue;
        }
        let bg = match background(tree, id)? {
            Paint::Unset => continue,
            Paint::Runtime => {
                out.push(input.unverifiable(id, "Background color"));
                continue;
            }
            Paint::Color(c) => c,
        };

        let size = text_size(tree, id);
        let result = compute_contrast(fg, bg);
        if !result.passes(size, WcagLevel::AA) {
            out.push(
                input
                    .finding_at(
                        id,
                        Severity::High,
                        format!(
                            "Text contrast {:.2}:1 ({fg} on {bg}) is below the AA minimum of {}:1 for {size} text",
                            result.ratio,
                            threshold(size, WcagLevel::AA)
                        ),
                    )
                    .with_fix("Darken the text or lighten the background until the ratio meets the threshold"),
            );
        } else if input.ctx.wcag_level == WcagLevel::AAA && !result.passes(size, WcagLevel::AAA) {
            out.push(
                input
                    .finding_at(
                        id,
                        Severity::Medium,
                        format!(
                            "Text contrast {:.2}:1 ({fg} on {bg}) meets AA but not the AAA minimum of {}:1 for {size} text",
                            result.ratio,
                            threshold(size, WcagLevel::AAA)
                        ),
                    )
                    .with_wcag("1.4.6"),
            );
        }
    }
    Ok(out)
}

fn has_icon(tree: &FactTree, id: NodeId) -> bool {
    tree.descendants(id).into_iter().any(|n| {
        let tag = tree.node(n).tag.as_str();
        matches!(tag, "svg" | "img" | "i") || tag.ends_with("Icon")
    })
}

fn conveys_state(fact: &ElementFact) -> bool {
    fact.has_any_attr(&["aria-invalid", "aria-describedby", "aria-errormessage", "role"])
}

/// Semantic color classes on elements with no text, icon or name.
pub(super) fn color_only_signal(input: &RuleInput<'_>) -> RuleResult {
    let tree = input.tree;
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        if fact.is_component() {
            continue;
        }
        let classes = ClassList::of(fact);
        let Some(token) = classes.tokens.iter().find(|t| SEMANTIC_COLOR_RE.is_match(t)) else {
            continue;
        };
        if has_text(tree, id) || has_icon(tree, id) || conveys_state(fact) {
            continue;
        }
        if std::iter::once(id)
            .chain(tree.descendants(id))
            .any(|n| has_accessible_name(tree.node(n)))
        {
            continue;
        }
        out.push(
            input
                .finding_at(
                    id,
                    Severity::Medium,
                    format!("`{token}` on <{}> signals state with color alone", fact.tag),
                )
                .with_fix("Pair the color with text, an icon, or aria-invalid/aria-describedby"),
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisContext;
    use crate::rules::test_support::{run_rule, run_rule_with};
    use crate::rules::{RuleInput, BUILTIN};
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    const CONTRAST: &str = "a11y.insufficient-contrast";
    const COLOR_ONLY: &str = "a11y.color-only-signal";

    #[test]
    fn low_contrast_text_is_high() {
        let src = "const a = <div style={{ background: '#ffffff' }}><p style={{ color: '#999999' }}>Muted</p></div>;";
        let findings = run_rule(CONTRAST, src);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].message.contains("2.85:1"), "{}", findings[0].message);
    }

    #[test]
    fn large_text_uses_the_large_threshold() {
        // #949494 on white is about 3.03:1: fails normal, passes large.
        let src = "const a = <h1 style={{ color: '#949494', backgroundColor: '#fff' }}>Title</h1>;";
        assert!(run_rule(CONTRAST, src).is_empty());
        let small = "const a = <p style={{ color: '#949494', backgroundColor: '#fff' }}>Body</p>;";
        assert_eq!(run_rule(CONTRAST, small).len(), 1);
    }

    #[test]
    fn aaa_only_failures_are_medium_under_aaa() {
        let src = "const a = <p style={{ color: '#767676', background: 'white' }}>Body</p>;";
        assert!(run_rule(CONTRAST, src).is_empty());
        let ctx = AnalysisContext::default().with_wcag_level(WcagLevel::AAA);
        let findings = run_rule_with(CONTRAST, src, &ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[0].wcag.as_deref(), Some("1.4.6"));
    }

    #[test]
    fn runtime_colors_are_unverifiable_and_missing_backgrounds_skip() {
        let dynamic = "const a = <p style={{ color: theme.fg, background: '#fff' }}>x</p>;";
        let findings = run_rule(CONTRAST, dynamic);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);

        let no_bg = "const a = <p style={{ color: '#999' }}>x</p>;";
        assert!(run_rule(CONTRAST, no_bg).is_empty());
    }

    #[test]
    fn unparseable_color_fails_the_rule() {
        let tree = crate::extract::extract("const a = <p style={{ color: 'rgb(1,2,3)', background: '#fff' }}>x</p>;")
            .unwrap();
        let rule = BUILTIN.iter().find(|r| r.id == CONTRAST).unwrap();
        let ctx = AnalysisContext::default();
        let visited = RefCell::new(BTreeSet::new());
        let input = RuleInput::new(&tree, &ctx, rule, &visited);
        let err = (rule.evaluate)(&input).unwrap_err();
        assert_eq!(err.input, "rgb(1,2,3)");
    }

    #[test]
    fn color_only_dot_is_flagged() {
        let findings = run_rule(COLOR_ONLY, r#"const a = <span className="dot bg-green-500" />;"#);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("bg-green-500"));
    }

    #[test]
    fn color_with_text_icon_or_aria_passes() {
        for src in [
            r#"const a = <span className="text-red-600">Payment failed</span>;"#,
            r#"const a = <span className="text-error"><AlertIcon /></span>;"#,
            r#"const a = <input className="border-red-500" aria-invalid="true" />;"#,
            r#"const a = <span className="bg-green-500" aria-label="Online" />;"#,
        ] {
            assert!(run_rule(COLOR_ONLY, src).is_empty(), "{src}");
        }
    }
}
