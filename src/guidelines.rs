// src/guidelines.rs
//! WCAG 2.1 reference table for the success criteria the rules check.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guideline {
    /// Success criterion number, e.g. `1.4.3`.
    pub criterion: &'static str,
    pub principle: &'static str,
    pub guideline: &'static str,
    pub requirement: &'static str,
    /// Conformance level: `A`, `AA` or `AAA`.
    pub level: &'static str,
}

const fn sc(
    criterion: &'static str,
    principle: &'static str,
    guideline: &'static str,
    requirement: &'static str,
    level: &'static str,
) -> Guideline {
    Guideline {
        criterion,
        principle,
        guideline,
        requirement,
        level,
    }
}

pub const WCAG_GUIDELINES: &[Guideline] = &[
    sc("1.1.1", "Perceivable", "Text Alternatives", "Provide text alternatives for non-text content", "A"),
    sc("1.4.1", "Perceivable", "Use of Color", "Color is not the only visual means of conveying information", "A"),
    sc("1.4.3", "Perceivable", "Color Contrast", "Minimum contrast ratio of 4.5:1 for normal text and 3:1 for large text", "AA"),
    sc("1.4.4", "Perceivable", "Resize Text", "Text can be resized up to 200% without loss of content", "AA"),
    sc("1.4.6", "Perceivable", "Enhanced Contrast", "Contrast ratio of 7:1 for normal text and 4.5:1 for large text", "AAA"),
    sc("1.4.10", "Perceivable", "Reflow", "Content reflows at 320 CSS pixels without horizontal scrolling", "AA"),
    sc("2.1.1", "Operable", "Keyboard Accessible", "All functionality available via keyboard", "A"),
    sc("2.4.3", "Operable", "Focus Order", "Focus order preserves meaning and operability", "A"),
    sc("2.4.7", "Operable", "Focus Visible", "Keyboard focus indicator visible", "AA"),
    sc("2.5.5", "Operable", "Target Size", "Pointer targets are at least 44 by 44 CSS pixels", "AAA"),
    sc("3.3.1", "Understandable", "Error Identification", "Input errors are identified and described to user", "A"),
    sc("3.3.2", "Understandable", "Labels or Instructions", "Labels or instructions are provided for user input", "A"),
    sc("4.1.2", "Robust", "Name, Role, Value", "Elements have appropriate ARIA attributes", "A"),
];

#[must_use]
pub fn lookup(criterion: &str) -> Option<&'static Guideline> {
    WCAG_GUIDELINES.iter().find(|g| g.criterion == criterion)
}
