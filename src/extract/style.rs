// src/extract/style.rs
//! Inline `style` and `className` values, read from an element's attributes.

use super::fact::{AttrValue, ElementFact};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static STRING_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'([^'\n]*)'|"([^"\n]*)"|`([^`$]*)`"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static PX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(px)?\s*$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Numeric React style props that do not get an implicit `px`.
const UNITLESS: &[&str] = &[
    "font-weight",
    "line-height",
    "opacity",
    "z-index",
    "flex",
    "flex-grow",
    "flex-shrink",
    "order",
    "zoom",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    Literal(String),
    Dynamic(String),
}

impl StyleValue {
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            Self::Dynamic(_) => None,
        }
    }
}

/// Declarations from a `style` attribute, keyed by kebab-case property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub props: BTreeMap<String, StyleValue>,
    /// The style comes from an expression (or spread) we cannot see into.
    pub opaque: bool,
}

impl InlineStyle {
    #[must_use]
    pub fn of(fact: &ElementFact) -> Self {
        match fact.attr("style") {
            None | Some(AttrValue::Flag(_)) => Self::default(),
            Some(AttrValue::Literal(css)) => Self::from_css(css),
            Some(AttrValue::Dynamic(expr)) => Self::from_object(expr),
        }
    }

    #[must_use]
    pub fn get(&self, prop: &str) -> Option<&StyleValue> {
        self.props.get(prop)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && !self.opaque
    }

    /// `color: red; font-size: 12px`
    fn from_css(css: &str) -> Self {
        let props = css
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(k, v)| {
                (
                    k.trim().to_ascii_lowercase(),
                    StyleValue::Literal(v.trim().to_string()),
                )
            })
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { props, opaque: false }
    }

    /// `{ color: '#333', fontSize: 14, ...rest }`
    fn from_object(expr: &str) -> Self {
        let Some(body) = expr
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        else {
            return Self {
                props: BTreeMap::new(),
                opaque: true,
            };
        };

        let mut style = Self::default();
        for entry in split_top_level(body) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if entry.starts_with("...") {
                style.opaque = true;
                continue;
            }
            let Some((key, value)) = entry.split_once(':') else {
                // Shorthand `{ color }`.
                style
                    .props
                    .insert(kebab_case(entry), StyleValue::Dynamic(entry.to_string()));
                continue;
            };
            let key = kebab_case(key.trim().trim_matches(['\'', '"']));
            let value = object_value(&key, value.trim());
            style.props.insert(key, value);
        }
        style
    }
}

fn object_value(key: &str, raw: &str) -> StyleValue {
    if let Some(inner) = unquote(raw) {
        return StyleValue::Literal(inner.to_string());
    }
    if raw.parse::<f64>().is_ok() {
        if UNITLESS.contains(&key) {
            return StyleValue::Literal(raw.to_string());
        }
        return StyleValue::Literal(format!("{raw}px"));
    }
    StyleValue::Dynamic(raw.to_string())
}

fn unquote(raw: &str) -> Option<&str> {
    ['\'', '"', '`'].into_iter().find_map(|q| {
        raw.strip_prefix(q)
            .and_then(|s| s.strip_suffix(q))
            .filter(|inner| !inner.contains(q) && !inner.contains("${"))
    })
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth -= 1,
            (None, ',') if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// `fontSize` -> `font-size`. Already-kebab names pass through.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Class tokens from `className`/`class`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    pub tokens: Vec<String>,
    /// Part of the class list is computed at runtime.
    pub dynamic: bool,
}

impl ClassList {
    #[must_use]
    pub fn of(fact: &ElementFact) -> Self {
        let mut list = Self::default();
        for name in ["className", "class"] {
            match fact.attr(name) {
                Some(AttrValue::Literal(s)) => {
                    list.tokens.extend(s.split_whitespace().map(str::to_string));
                }
                Some(AttrValue::Dynamic(expr)) => {
                    list.dynamic = true;
                    for cap in STRING_LITERAL_RE.captures_iter(expr) {
                        let text = cap
                            .get(1)
                            .or_else(|| cap.get(2))
                            .or_else(|| cap.get(3))
                            .map_or("", |m| m.as_str());
                        list.tokens.extend(text.split_whitespace().map(str::to_string));
                    }
                }
                _ => {}
            }
        }
        list
    }

    #[must_use]
    pub fn any(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.tokens.iter().any(|t| pred(t))
    }
}

/// `14px` or `14` -> 14.0. Other units are not pixel values.
#[must_use]
pub fn px_value(value: &str) -> Option<f64> {
    PX_RE.captures(value).and_then(|c| c[1].parse().ok())
}
