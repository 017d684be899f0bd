// src/rules/registry.rs
//! The built-in rule catalog. Table order is execution order.

use super::{a11y_contrast, a11y_keyboard, a11y_labels, performance, responsive, ux};
use super::{Gate, Rule};
use crate::config::WcagLevel;
use crate::types::{Category, Severity};

pub const BUILTIN: &[Rule] = &[
    // === ACCESSIBILITY ===
    Rule {
        id: "a11y.icon-button-missing-label",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Aria,
        wcag: Some("4.1.2"),
        severity: Severity::High,
        summary: "Icon-only control without an accessible name",
        rationale: "Screen readers announce an unnamed control as just \"button\", so users cannot tell what it does.",
        evaluate: a11y_labels::icon_button_missing_label,
    },
    Rule {
        id: "a11y.image-without-alt",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Always,
        wcag: Some("1.1.1"),
        severity: Severity::High,
        summary: "Image without alt text",
        rationale: "Non-text content needs a text alternative; decorative images need an empty one.",
        evaluate: a11y_labels::image_without_alt,
    },
    Rule {
        id: "a11y.click-without-keyboard-pair",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Keyboard,
        wcag: Some("2.1.1"),
        severity: Severity::High,
        summary: "Click handler on a non-interactive element without keyboard support",
        rationale: "Keyboard and switch users cannot reach or activate elements that only respond to the mouse.",
        evaluate: a11y_keyboard::click_without_keyboard_pair,
    },
    Rule {
        id: "a11y.missing-focus-visible",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Keyboard,
        wcag: Some("2.4.7"),
        severity: Severity::Medium,
        summary: "Interactive element without a visible focus style",
        rationale: "Keyboard users need to see which element has focus.",
        evaluate: a11y_keyboard::missing_focus_visible,
    },
    Rule {
        id: "a11y.color-only-signal",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Always,
        wcag: Some("1.4.1"),
        severity: Severity::Medium,
        summary: "State conveyed by color alone",
        rationale: "Color-blind and low-vision users miss states that are signalled only by hue.",
        evaluate: a11y_contrast::color_only_signal,
    },
    Rule {
        id: "a11y.insufficient-contrast",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Always,
        wcag: Some("1.4.3"),
        severity: Severity::High,
        summary: "Text color contrast below the WCAG threshold",
        rationale: "Low-contrast text is hard to read for low-vision users and in bright light.",
        evaluate: a11y_contrast::insufficient_contrast,
    },
    Rule {
        id: "a11y.input-without-label",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Always,
        wcag: Some("3.3.2"),
        severity: Severity::Medium,
        summary: "Form control without a label",
        rationale: "Without a programmatic label, assistive technology cannot say what a field is for.",
        evaluate: a11y_labels::input_without_label,
    },
    Rule {
        id: "a11y.positive-tabindex",
        category: Category::Accessibility,
        level: None,
        gate: Gate::Keyboard,
        wcag: Some("2.4.3"),
        severity: Severity::Medium,
        summary: "Positive tabIndex",
        rationale: "Positive tabIndex values jump ahead of the document order and make focus order unpredictable.",
        evaluate: a11y_keyboard::positive_tabindex,
    },
    Rule {
        id: "a11y.target-size",
        category: Category::Accessibility,
        level: Some(WcagLevel::AAA),
        gate: Gate::Always,
        wcag: Some("2.5.5"),
        severity: Severity::Medium,
        summary: "Pointer target smaller than 44x44px",
        rationale: "Small targets are hard to hit for users with tremors and on touch screens.",
        evaluate: a11y_keyboard::target_size,
    },
    // === RESPONSIVE ===
    Rule {
        id: "responsive.breakpoint-coverage",
        category: Category::Responsive,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Medium,
        summary: "Too few target breakpoints or no mobile breakpoint",
        rationale: "A layout verified at one width usually breaks at the others.",
        evaluate: responsive::breakpoint_coverage,
    },
    Rule {
        id: "responsive.fixed-pixel-typography",
        category: Category::Responsive,
        level: None,
        gate: Gate::Always,
        wcag: Some("1.4.4"),
        severity: Severity::Low,
        summary: "Pixel font sizes in a mobile-first component",
        rationale: "Pixel font sizes ignore the user's preferred text size.",
        evaluate: responsive::fixed_pixel_typography,
    },
    Rule {
        id: "responsive.fixed-width-overflow",
        category: Category::Responsive,
        level: None,
        gate: Gate::Always,
        wcag: Some("1.4.10"),
        severity: Severity::Medium,
        summary: "Fixed width wider than the smallest breakpoint",
        rationale: "Content wider than the viewport forces horizontal scrolling on small screens.",
        evaluate: responsive::fixed_width_overflow,
    },
    Rule {
        id: "responsive.fixed-height-text",
        category: Category::Responsive,
        level: None,
        gate: Gate::Always,
        wcag: Some("1.4.4"),
        severity: Severity::Low,
        summary: "Fixed pixel height on an element holding text",
        rationale: "Text that wraps on a narrow screen or is enlarged by the user overflows a fixed height.",
        evaluate: responsive::fixed_height_text,
    },
    Rule {
        id: "responsive.desktop-first-media-query",
        category: Category::Responsive,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Low,
        summary: "max-width media queries in a mobile-first component",
        rationale: "Desktop-first overrides ship the large layout to phones and undo it afterwards.",
        evaluate: responsive::desktop_first_media_query,
    },
    // === PERFORMANCE ===
    Rule {
        id: "perf.list-without-key",
        category: Category::Performance,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Medium,
        summary: "List item without a stable key",
        rationale: "Without stable keys React re-creates rows and loses their state on every change.",
        evaluate: performance::list_without_key,
    },
    Rule {
        id: "perf.list-virtualization",
        category: Category::Performance,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Low,
        summary: "Long or unbounded list rendered without windowing",
        rationale: "Rendering every row of a long list costs layout and memory proportional to its length.",
        evaluate: performance::list_virtualization,
    },
    Rule {
        id: "perf.inline-handler-in-list",
        category: Category::Performance,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Low,
        summary: "Inline closure handler inside a list",
        rationale: "A new function per row per render defeats memoized rows.",
        evaluate: performance::inline_handler_in_list,
    },
    Rule {
        id: "perf.unmemoized-list-component",
        category: Category::Performance,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Low,
        summary: "List component not wrapped in memo",
        rationale: "Parents re-rendering with equal props re-render the whole list.",
        evaluate: performance::unmemoized_list_component,
    },
    Rule {
        id: "perf.heavy-static-import",
        category: Category::Performance,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Low,
        summary: "Heavy module imported statically",
        rationale: "Large dependencies in the initial bundle delay first render.",
        evaluate: performance::heavy_static_import,
    },
    // === UX ===
    Rule {
        id: "ux.missing-state-coverage",
        category: Category::Ux,
        level: None,
        gate: Gate::Always,
        wcag: None,
        severity: Severity::Medium,
        summary: "Data fetching without loading, error or empty states",
        rationale: "Users see blank or broken screens while data loads, fails or comes back empty.",
        evaluate: ux::missing_state_coverage,
    },
    Rule {
        id: "ux.form-without-validation-feedback",
        category: Category::Ux,
        level: None,
        gate: Gate::Always,
        wcag: Some("3.3.1"),
        severity: Severity::Medium,
        summary: "Form without validation feedback",
        rationale: "Users cannot fix input errors they are never told about.",
        evaluate: ux::form_without_validation_feedback,
    },
];
