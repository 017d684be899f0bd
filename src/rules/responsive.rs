// src/rules/responsive.rs
//! Responsive design: breakpoint plan, fixed pixel sizes, media query direction.

use super::{RuleInput, RuleResult};
use crate::extract::{px_value, ClassList, InlineStyle, StyleValue};
use crate::types::Severity;
use regex::Regex;
use std::sync::LazyLock;

/// Tailwind arbitrary values such as `text-[13px]` or `w-[600px]`.
static ARBITRARY_PX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w-]+:)*(text|w|min-w|h|max-h)-\[(\d+(?:\.\d+)?)px\]$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// The widest viewport still considered a phone.
pub const MOBILE_MAX_PX: u32 = 480;
pub const MIN_BREAKPOINTS: usize = 3;

/// Fewer than three target breakpoints, or none at phone width.
pub(super) fn breakpoint_coverage(input: &RuleInput<'_>) -> RuleResult {
    let bps = &input.ctx.target_breakpoints;
    let mut problems = Vec::new();
    if bps.len() < MIN_BREAKPOINTS {
        problems.push(format!(
            "Only {} target breakpoint(s) {bps:?}; at least {MIN_BREAKPOINTS} are expected",
            bps.len()
        ));
    }
    if !bps.iter().any(|&w| w <= MOBILE_MAX_PX) {
        problems.push(format!("No mobile breakpoint at or below {MOBILE_MAX_PX}px"));
    }
    if problems.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![input
        .finding(Severity::Medium, problems.join(". "))
        .with_fix("Target at least 320px, 768px and 1024px widths")])
}

fn arbitrary_px<'t>(classes: &'t ClassList, kinds: &[&str]) -> Option<(&'t str, f64)> {
    classes.tokens.iter().find_map(|t| {
        let caps = ARBITRARY_PX_RE.captures(t)?;
        if !kinds.contains(&caps.get(1)?.as_str()) {
            return None;
        }
        Some((t.as_str(), caps.get(2)?.as_str().parse().ok()?))
    })
}

/// Pixel font sizes in a mobile-first component.
pub(super) fn fixed_pixel_typography(input: &RuleInput<'_>) -> RuleResult {
    if !input.ctx.mobile_first {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        let style = InlineStyle::of(fact);
        let inline = match style.get("font-size") {
            Some(StyleValue::Literal(v)) if v.trim().ends_with("px") => Some(v.trim().to_string()),
            Some(StyleValue::Dynamic(_)) => {
                out.push(input.unverifiable(id, "Font size"));
                continue;
            }
            _ => None,
        };
        let class = arbitrary_px(&ClassList::of(fact), &["text"]).map(|(t, _)| format!("`{t}`"));
        if let Some(size) = inline.or(class) {
            out.push(
                input
                    .finding_at(id, Severity::Low, format!("Font size {size} on <{}> does not scale with user settings", fact.tag))
                    .with_fix("Use rem units (e.g. 0.875rem) so text follows the user's font size"),
            );
        }
    }
    let css = input.tree.script.css_px_font_sizes;
    if css > 0 {
        out.push(
            input
                .finding(Severity::Low, format!("{css} font-size declaration(s) in component CSS use px"))
                .with_fix("Use rem units in stylesheet font sizes"),
        );
    }
    Ok(out)
}

/// Literal widths wider than the narrowest target viewport.
pub(super) fn fixed_width_overflow(input: &RuleInput<'_>) -> RuleResult {
    let Some(smallest) = input.ctx.smallest_breakpoint() else {
        return Ok(Vec::new());
    };
    let limit = f64::from(smallest);
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        let style = InlineStyle::of(fact);
        let mut widest: Option<(String, f64)> = None;
        let mut unknown = false;
        for prop in ["width", "min-width"] {
            match style.get(prop) {
                Some(StyleValue::Literal(v)) => {
                    if let Some(px) = px_value(v).filter(|&px| px > limit) {
                        widest = Some((format!("{prop}: {}", v.trim()), px));
                    }
                }
                Some(StyleValue::Dynamic(_)) => unknown = true,
                None => {}
            }
        }
        if widest.is_none() {
            widest = arbitrary_px(&ClassList::of(fact), &["w", "min-w"])
                .filter(|&(_, px)| px > limit)
                .map(|(t, px)| (format!("`{t}`"), px));
        }
        match widest {
            Some((what, _)) => out.push(
                input
                    .finding_at(
                        id,
                        Severity::Medium,
                        format!("<{}> has {what}, wider than the {smallest}px breakpoint", fact.tag),
                    )
                    .with_fix("Use max-width with a percentage or fluid width instead of a fixed pixel width"),
            ),
            None if unknown => out.push(input.unverifiable(id, "Width")),
            None => {}
        }
    }
    Ok(out)
}

/// Pixel heights on elements that hold text.
pub(super) fn fixed_height_text(input: &RuleInput<'_>) -> RuleResult {
    let mut out = Vec::new();
    for (id, fact) in input.elements() {
        if !fact.has_text_content() {
            continue;
        }
        let style = InlineStyle::of(fact);
        let mut fixed = None;
        let mut unknown = false;
        for prop in ["height", "max-height"] {
            match style.get(prop) {
                Some(StyleValue::Literal(v)) if fixed.is_none() && px_value(v).is_some() => {
                    fixed = Some(format!("{prop}: {}", v.trim()));
                }
                Some(StyleValue::Dynamic(_)) => unknown = true,
                _ => {}
            }
        }
        if fixed.is_none() {
            fixed = arbitrary_px(&ClassList::of(fact), &["h", "max-h"]).map(|(t, _)| format!("`{t}`"));
        }
        match fixed {
            Some(what) => out.push(
                input
                    .finding_at(
                        id,
                        Severity::Low,
                        format!("<{}> has {what}; wrapped or enlarged text will be clipped", fact.tag),
                    )
                    .with_fix("Use min-height or let the content set the height"),
            ),
            None if unknown => out.push(input.unverifiable(id, "Height")),
            None => {}
        }
    }
    Ok(out)
}

/// `max-width` media queries in a mobile-first component.
pub(super) fn desktop_first_media_query(input: &RuleInput<'_>) -> RuleResult {
    let count = input.tree.script.max_width_queries;
    if !input.ctx.mobile_first || count == 0 {
        return Ok(Vec::new());
    }
    Ok(vec![input
        .finding(
            Severity::Low,
            format!("{count} max-width media quer{} found in a mobile-first component", if count == 1 { "y" } else { "ies" }),
        )
        .with_fix("Write base styles for small screens and layer min-width queries on top")])
}
