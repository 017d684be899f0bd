// src/contrast.rs
//! WCAG 2.1 color contrast.
//!
//! - AA: 4.5:1 for normal text, 3:1 for large text
//! - AAA: 7:1 for normal text, 4.5:1 for large text
//!
//! Large text is at least 18pt, or 14pt bold.

use crate::config::WcagLevel;
use crate::error::InvalidColorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const AA_NORMAL: f64 = 4.5;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;
pub const AAA_LARGE: f64 = 4.5;

/// sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colors accepted alongside hex literals.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("olive", Color::rgb(128, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("teal", Color::rgb(0, 128, 128)),
    ("navy", Color::rgb(0, 0, 128)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("purple", Color::rgb(128, 0, 128)),
    ("orange", Color::rgb(255, 165, 0)),
];

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RGB`, `#RRGGBB` (case-insensitive) or a supported color name.
    ///
    /// # Errors
    /// Returns `InvalidColorError` for anything else. There is no fallback color.
    pub fn parse(input: &str) -> Result<Self, InvalidColorError> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(input, hex);
        }
        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
            .ok_or_else(|| InvalidColorError::new(input, "expected #RGB, #RRGGBB or a named color"))
    }

    /// Relative luminance per WCAG 2.1.
    /// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        let lin = [self.r, self.g, self.b].map(|c| {
            let v = f64::from(c) / 255.0;
            if v <= 0.03928 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        });
        0.2126 * lin[0] + 0.7152 * lin[1] + 0.0722 * lin[2]
    }
}

fn parse_hex(input: &str, hex: &str) -> Result<Color, InvalidColorError> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InvalidColorError::new(input, "non-hex digit"));
    }
    let channel = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| InvalidColorError::new(input, "non-hex digit"))
    };
    match hex.len() {
        3 => Ok(Color::rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Ok(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => Err(InvalidColorError::new(input, "hex colors must have 3 or 6 digits")),
    }
}

impl FromStr for Color {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    /// At least 18pt, or 14pt bold.
    Large,
}

impl TextSize {
    /// 18pt = 24px, 14pt = 18.67px.
    #[must_use]
    pub fn from_px(px: f64, bold: bool) -> Self {
        if px >= 24.0 || (bold && px >= 18.66) {
            Self::Large
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Large => f.write_str("large"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub passes_aa_normal: bool,
    pub passes_aa_large: bool,
    pub passes_aaa_normal: bool,
    pub passes_aaa_large: bool,
}

impl ContrastResult {
    #[must_use]
    pub fn passes(&self, size: TextSize, level: WcagLevel) -> bool {
        match (level, size) {
            (WcagLevel::AA, TextSize::Normal) => self.passes_aa_normal,
            (WcagLevel::AA, TextSize::Large) => self.passes_aa_large,
            (WcagLevel::AAA, TextSize::Normal) => self.passes_aaa_normal,
            (WcagLevel::AAA, TextSize::Large) => self.passes_aaa_large,
        }
    }
}

/// Minimum ratio for a text size at a conformance level.
#[must_use]
pub fn threshold(size: TextSize, level: WcagLevel) -> f64 {
    match (level, size) {
        (WcagLevel::AA, TextSize::Normal) => AA_NORMAL,
        (WcagLevel::AA, TextSize::Large) => AA_LARGE,
        (WcagLevel::AAA, TextSize::Normal) => AAA_NORMAL,
        (WcagLevel::AAA, TextSize::Large) => AAA_LARGE,
    }
}

#[must_use]
pub fn classify(ratio: f64, size: TextSize, level: WcagLevel) -> bool {
    ratio >= threshold(size, level)
}

/// Contrast ratio between two colors; order-independent, in `1.0..=21.0`.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let l1 = a.relative_luminance();
    let l2 = b.relative_luminance();
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[must_use]
pub fn compute_contrast(foreground: Color, background: Color) -> ContrastResult {
    let ratio = contrast_ratio(foreground, background);
    ContrastResult {
        ratio,
        passes_aa_normal: classify(ratio, TextSize::Normal, WcagLevel::AA),
        passes_aa_large: classify(ratio, TextSize::Large, WcagLevel::AA),
        passes_aaa_normal: classify(ratio, TextSize::Normal, WcagLevel::AAA),
        passes_aaa_large: classify(ratio, TextSize::Large, WcagLevel::AAA),
    }
}

/// Parses both color literals and computes their contrast.
///
/// # Errors
/// Returns `InvalidColorError` if either literal is not a supported color.
pub fn contrast_between(foreground: &str, background: &str) -> Result<ContrastResult, InvalidColorError> {
    Ok(compute_contrast(Color::parse(foreground)?, Color::parse(background)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#fff"), Ok(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("#000"), Ok(Color::rgb(0, 0, 0)));
        assert_eq!(Color::parse("#FF0000"), Ok(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse("#00ff00"), Ok(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(Color::parse("Navy"), Ok(Color::rgb(0, 0, 128)));
        assert_eq!(Color::parse(" white "), Ok(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn rejects_unsupported_literals() {
        for bad in ["#ffff", "#ggg", "rgb(0,0,0)", "chartreuse-ish", "", "#"] {
            assert!(Color::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn black_on_white_is_maximum() {
        let result = contrast_between("#000000", "#FFFFFF").unwrap();
        assert!((result.ratio - 21.0).abs() < 1e-9, "got {:.4}", result.ratio);
        assert!(result.passes_aaa_normal);
    }

    #[test]
    fn identical_colors_are_one() {
        let result = contrast_between("#777777", "#777777").unwrap();
        assert_eq!(result.ratio, 1.0);
        assert!(!result.passes_aa_large);
    }

    #[test]
    fn ratio_is_symmetric() {
        let samples = ["#000", "#fff", "#777777", "#0a84ff", "#e11d48", "#595959", "orange"];
        for a in samples {
            for b in samples {
                let ab = contrast_between(a, b).unwrap().ratio;
                let ba = contrast_between(b, a).unwrap().ratio;
                assert_eq!(ab, ba, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn aaa_implies_aa() {
        let samples = ["#000", "#fff", "#767676", "#595959", "#949494", "#0000ff", "#ff0000"];
        for a in samples {
            for b in samples {
                let r = contrast_between(a, b).unwrap();
                assert!(!r.passes_aaa_normal || r.passes_aa_normal);
                assert!(!r.passes_aaa_large || r.passes_aa_large);
            }
        }
    }

    #[test]
    fn grey_767676_on_white_just_passes_aa() {
        let r = contrast_between("#767676", "#ffffff").unwrap();
        assert!(r.passes_aa_normal, "ratio {:.3}", r.ratio);
        assert!(!r.passes_aaa_normal);
    }

    #[test]
    fn classify_uses_level_thresholds() {
        assert!(classify(4.5, TextSize::Normal, WcagLevel::AA));
        assert!(!classify(4.49, TextSize::Normal, WcagLevel::AA));
        assert!(classify(3.0, TextSize::Large, WcagLevel::AA));
        assert!(!classify(6.9, TextSize::Normal, WcagLevel::AAA));
        assert!(classify(4.5, TextSize::Large, WcagLevel::AAA));
    }

    #[test]
    fn text_size_from_px() {
        assert_eq!(TextSize::from_px(16.0, false), TextSize::Normal);
        assert_eq!(TextSize::from_px(24.0, false), TextSize::Large);
        assert_eq!(TextSize::from_px(19.0, true), TextSize::Large);
        assert_eq!(TextSize::from_px(19.0, false), TextSize::Normal);
    }
}
