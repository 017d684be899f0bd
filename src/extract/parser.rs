// src/extract/parser.rs
//! Single-pass JSX/TSX scanner.
//!
//! Script regions are skimmed (strings, comments, template literals, bracket
//! balance) only far enough to find where markup starts. Markup is parsed
//! strictly: every element must close, every attribute value must terminate.

use super::fact::{AttrValue, ElementFact, FactTree, Iteration, ListBound, NodeId, Span, ROOT};
use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;

type Result<T> = std::result::Result<T, ParseError>;

/// Keywords after which `<` starts an expression rather than a comparison.
const EXPRESSION_KEYWORDS: &[&str] = &["return", "yield", "default", "case", "else", "do"];

static MAP_PARAMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:function\s*)?\(\s*[A-Za-z_$][\w$]*\s*(?::[^,)]*)?,\s*([A-Za-z_$][\w$]*)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:length\s*:\s*|Array\(\s*|\.slice\(\s*\d+\s*,\s*)(\d+)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// What the last significant script token was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Open,
    Operator,
    Keyword,
    Value,
}

impl Prev {
    fn allows_markup(self) -> bool {
        !matches!(self, Self::Value)
    }
}

/// Byte offsets of line starts, for offset -> line/column.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn span(&self, src: &str, offset: usize) -> Span {
        let line = self.starts.partition_point(|&s| s <= offset);
        let start = self.starts[line - 1];
        let column = src.get(start..offset).map_or(1, |s| s.chars().count() + 1);
        Span { line, column }
    }
}

pub(crate) struct Parsed {
    pub tree: FactTree,
    /// Script text with markup removed.
    pub script: String,
    /// Template literal bodies and `<style>` text.
    pub css: String,
}

pub(crate) struct Parser<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    lines: LineIndex,
    tree: FactTree,
    script: String,
    css: String,
}

impl<'s> Parser<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            lines: LineIndex::new(src),
            tree: FactTree::new(),
            script: String::new(),
            css: String::new(),
        }
    }

    pub(crate) fn run(mut self) -> Result<Parsed> {
        self.script_until(ROOT, None)?;
        Ok(Parsed {
            tree: self.tree,
            script: self.script,
            css: self.css,
        })
    }

    // --- cursor helpers ---

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn error_at(&self, offset: usize, reason: impl Into<String>) -> ParseError {
        let span = self.lines.span(self.src, offset);
        ParseError::new(span.line, span.column, reason)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Up to `max` bytes from the cursor, cut at a char boundary.
    fn lookahead(&self, max: usize) -> &'s str {
        let mut end = (self.pos + max).min(self.src.len());
        while !self.src.is_char_boundary(end) {
            end -= 1;
        }
        &self.src[self.pos..end]
    }

    fn flush_script(&mut self, from: usize, to: usize) {
        if let Some(seg) = self.src.get(from..to) {
            self.script.push_str(seg);
            self.script.push(' ');
        }
    }

    // --- script mode ---

    /// Scans script until EOF (`close == None`) or the matching `close` byte,
    /// which is consumed. Markup found on the way becomes children of `parent`.
    fn script_until(&mut self, parent: NodeId, close: Option<u8>) -> Result<()> {
        let mut stack: Vec<(u8, usize)> = Vec::new();
        let mut maps: Vec<(usize, Iteration)> = Vec::new();
        let mut prev = Prev::Start;
        let mut seg = self.pos;

        loop {
            let Some(b) = self.peek() else {
                if let Some(&(open, at)) = stack.last() {
                    return Err(self.error_at(at, format!("unclosed '{}'", open as char)));
                }
                if let Some(c) = close {
                    return Err(self.error_at(self.pos, format!("expected '{}' before end of input", c as char)));
                }
                self.flush_script(seg, self.pos);
                return Ok(());
            };

            match b {
                b'/' if self.peek_at(1) == Some(b'/') => {
                    self.flush_script(seg, self.pos);
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.pos += 1;
                    }
                    seg = self.pos;
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    self.flush_script(seg, self.pos);
                    self.block_comment()?;
                    seg = self.pos;
                }
                b'/' if prev.allows_markup() => {
                    self.regex_literal()?;
                    prev = Prev::Value;
                }
                b'\'' | b'"' => {
                    self.string_literal(b)?;
                    prev = Prev::Value;
                }
                b'`' => {
                    self.flush_script(seg, self.pos);
                    self.template_literal(parent)?;
                    seg = self.pos;
                    prev = Prev::Value;
                }
                b'(' | b'[' | b'{' => {
                    stack.push((b, self.pos));
                    self.pos += 1;
                    prev = Prev::Open;
                }
                b')' | b']' | b'}' => {
                    let Some((open, at)) = stack.pop() else {
                        if close == Some(b) {
                            self.flush_script(seg, self.pos);
                            self.pos += 1;
                            return Ok(());
                        }
                        return Err(self.error_at(self.pos, format!("unbalanced '{}'", b as char)));
                    };
                    if !brackets_match(open, b) {
                        return Err(self.error_at(
                            self.pos,
                            format!(
                                "mismatched '{}': '{}' opened at {}",
                                b as char,
                                open as char,
                                self.lines.span(self.src, at).line
                            ),
                        ));
                    }
                    while maps.last().is_some_and(|(depth, _)| *depth > stack.len()) {
                        maps.pop();
                    }
                    self.pos += 1;
                    prev = Prev::Value;
                }
                b'<' if prev.allows_markup() && self.markup_starts_here() => {
                    self.flush_script(seg, self.pos);
                    let id = self.element(parent)?;
                    if let Some((_, it)) = maps.last() {
                        self.tree.node_mut(id).iteration = Some(it.clone());
                    }
                    seg = self.pos;
                    prev = Prev::Value;
                }
                b'.' if self.starts_with(".map(") => {
                    let iteration = self.iteration_here();
                    self.pos += ".map".len();
                    stack.push((b'(', self.pos));
                    self.pos += 1;
                    maps.push((stack.len(), iteration));
                    prev = Prev::Open;
                }
                c if is_ident_start(c) => {
                    let start = self.pos;
                    while self.peek().is_some_and(is_ident_char) {
                        self.pos += 1;
                    }
                    let word = &self.src[start..self.pos];
                    prev = if EXPRESSION_KEYWORDS.contains(&word) {
                        Prev::Keyword
                    } else {
                        Prev::Value
                    };
                }
                c if c.is_ascii_digit() => {
                    while self.peek().is_some_and(|d| d.is_ascii_alphanumeric() || d == b'.' || d == b'_') {
                        self.pos += 1;
                    }
                    prev = Prev::Value;
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                c if c.is_ascii() => {
                    self.pos += 1;
                    prev = Prev::Operator;
                }
                _ => {
                    // Non-ASCII outside strings: step over the whole char.
                    let len = self.src[self.pos..].chars().next().map_or(1, char::len_utf8);
                    self.pos += len;
                    prev = Prev::Value;
                }
            }
        }
    }

    /// `<` followed by a tag name or `>`, and not a TS generic like `<T,>`.
    fn markup_starts_here(&self) -> bool {
        match self.peek_at(1) {
            Some(b'>') => true,
            Some(c) if c.is_ascii_alphabetic() => {
                let mut i = self.pos + 1;
                while self.bytes.get(i).copied().is_some_and(is_tag_char) {
                    i += 1;
                }
                while self.bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                    i += 1;
                }
                let rest = &self.bytes[i..];
                !(rest.starts_with(b",") || rest.starts_with(b"extends "))
            }
            _ => false,
        }
    }

    fn block_comment(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.starts_with("*/") {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(self.error_at(start, "unterminated comment"))
    }

    fn string_literal(&mut self, quote: u8) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => break,
                _ if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(self.error_at(start, "unterminated string literal"))
    }

    /// `/.../flags` where an operand is expected. Quotes and brackets inside
    /// the pattern, including a `[...]` class, are not tokens.
    fn regex_literal(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => break,
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    while self.peek().is_some_and(|f| f.is_ascii_alphabetic()) {
                        self.pos += 1;
                    }
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(self.error_at(start, "unterminated regex literal"))
    }

    fn template_literal(&mut self, parent: NodeId) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        let mut seg = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.push_css(seg, self.pos);
                    self.pos += 1;
                    return Ok(());
                }
                b'$' if self.peek_at(1) == Some(b'{') => {
                    self.push_css(seg, self.pos);
                    self.pos += 2;
                    self.script_until(parent, Some(b'}'))?;
                    seg = self.pos;
                }
                _ => self.pos += 1,
            }
        }
        Err(self.error_at(start, "unterminated template literal"))
    }

    fn push_css(&mut self, from: usize, to: usize) {
        if let Some(seg) = self.src.get(from..to) {
            self.css.push_str(seg);
            self.css.push('\n');
        }
    }

    /// Describes the `.map(` at the cursor: receiver, bound and index param.
    fn iteration_here(&self) -> Iteration {
        let receiver = receiver_before(self.src, self.pos);
        let bound = bound_of(&receiver);
        let ahead = self.lookahead(160);
        let after = ahead.get(".map(".len()..).unwrap_or("");
        let index_param = MAP_PARAMS_RE.captures(after).map(|c| c[1].to_string());
        Iteration {
            receiver,
            bound,
            index_param,
        }
    }

    // --- markup mode ---

    fn tag_name(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_tag_char) {
            self.pos += 1;
        }
        self.src[start..self.pos].to_string()
    }

    /// Parses one element starting at `<`; returns its node id.
    fn element(&mut self, parent: NodeId) -> Result<NodeId> {
        let open = self.pos;
        let span = self.lines.span(self.src, open);
        self.pos += 1;
        let tag = self.tag_name();
        let id = self.tree.push(parent, ElementFact::new(tag.clone(), span));

        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(self.error_at(open, format!("unterminated tag <{tag}>"))),
                Some(b'/') => {
                    if self.peek_at(1) == Some(b'>') {
                        self.pos += 2;
                        return Ok(id);
                    }
                    return Err(self.error_at(self.pos, format!("expected '/>' in <{tag}>")));
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'{') => self.spread(id, &tag)?,
                Some(c) if c.is_ascii_alphabetic() || c == b'_' => self.attribute(id, &tag)?,
                Some(c) => {
                    return Err(self.error_at(
                        self.pos,
                        format!("unexpected '{}' in <{tag}>", c as char),
                    ))
                }
            }
        }

        self.children(id, &tag, open)?;
        Ok(id)
    }

    fn spread(&mut self, id: NodeId, tag: &str) -> Result<()> {
        let at = self.pos;
        self.pos += 1;
        self.skip_ws();
        if !self.starts_with("...") {
            return Err(self.error_at(at, format!("expected spread attribute in <{tag}>")));
        }
        self.script_until(id, Some(b'}'))?;
        self.tree.node_mut(id).spread = true;
        Ok(())
    }

    fn attribute(&mut self, id: NodeId, tag: &str) -> Result<()> {
        let at = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b':'))
        {
            self.pos += 1;
        }
        let name = self.src[at..self.pos].to_string();
        self.skip_ws();

        let value = if self.peek() == Some(b'=') {
            self.pos += 1;
            self.skip_ws();
            match self.peek() {
                Some(q @ (b'"' | b'\'')) => {
                    let start = self.pos + 1;
                    let Some(len) = self.bytes[start..].iter().position(|&c| c == q) else {
                        return Err(self.error_at(at, format!("unterminated attribute value for `{name}` in <{tag}>")));
                    };
                    self.pos = start + len + 1;
                    AttrValue::Literal(self.src[start..start + len].to_string())
                }
                Some(b'{') => {
                    self.pos += 1;
                    let start = self.pos;
                    self.script_until(id, Some(b'}'))?;
                    classify_expression(self.src[start..self.pos - 1].trim())
                }
                Some(b'<') if self.markup_starts_here() => {
                    let start = self.pos;
                    self.element(id)?;
                    AttrValue::Dynamic(self.src[start..self.pos].to_string())
                }
                _ => {
                    return Err(self.error_at(
                        self.pos,
                        format!("expected a value for `{name}` in <{tag}>"),
                    ))
                }
            }
        } else {
            AttrValue::Flag(true)
        };

        let node = self.tree.node_mut(id);
        if is_handler_name(&name) {
            node.handlers.insert(name.clone());
        }
        node.attributes.insert(name, value);
        Ok(())
    }

    fn children(&mut self, id: NodeId, tag: &str, open: usize) -> Result<()> {
        loop {
            match self.peek() {
                None => {
                    return Err(self.error_at(open, format!("unterminated element <{tag}>: missing </{tag}>")));
                }
                Some(b'<') if self.peek_at(1) == Some(b'/') => {
                    let close_at = self.pos;
                    self.pos += 2;
                    self.skip_ws();
                    let name = self.tag_name();
                    self.skip_ws();
                    if self.peek() != Some(b'>') {
                        return Err(self.error_at(close_at, format!("unterminated closing tag </{name}")));
                    }
                    self.pos += 1;
                    if name != tag {
                        return Err(self.error_at(
                            close_at,
                            format!("mismatched closing tag: expected </{tag}>, found </{name}>"),
                        ));
                    }
                    return Ok(());
                }
                Some(b'<') => {
                    if !self.markup_starts_here() {
                        return Err(self.error_at(self.pos, format!("unexpected '<' inside <{tag}>")));
                    }
                    self.element(id)?;
                }
                Some(b'{') => {
                    self.pos += 1;
                    let start = self.pos;
                    self.script_until(id, Some(b'}'))?;
                    if !is_comment_only(&self.src[start..self.pos - 1]) {
                        self.tree.node_mut(id).dynamic_content = true;
                    }
                }
                Some(_) => self.text(id, tag),
            }
        }
    }

    fn text(&mut self, id: NodeId, tag: &str) {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != b'<' && c != b'{') {
            self.pos += 1;
        }
        let raw = &self.src[start..self.pos];
        if tag == "style" {
            self.css.push_str(raw);
            self.css.push('\n');
        }
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return;
        }
        let node = self.tree.node_mut(id);
        if !node.text.is_empty() {
            node.text.push(' ');
        }
        node.text.push_str(&collapsed);
    }
}

fn brackets_match(open: u8, close: u8) -> bool {
    matches!((open, close), (b'(', b')') | (b'[', b']') | (b'{', b'}'))
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

fn is_tag_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b'-' | b':' | b'$')
}

/// `onClick`, `onKeyDown`, ... (an `on` prefix followed by an uppercase letter).
fn is_handler_name(name: &str) -> bool {
    name.strip_prefix("on")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
}

fn is_comment_only(inner: &str) -> bool {
    let t = inner.trim();
    t.is_empty() || (t.starts_with("/*") && t.ends_with("*/"))
}

/// Turns the text of `{...}` into an attribute value.
fn classify_expression(expr: &str) -> AttrValue {
    match expr {
        "true" => return AttrValue::Flag(true),
        "false" => return AttrValue::Flag(false),
        _ => {}
    }
    if expr.parse::<f64>().is_ok() {
        return AttrValue::Literal(expr.to_string());
    }
    for q in ['"', '\'', '`'] {
        if let Some(inner) = expr.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            if !inner.contains(q) && !(q == '`' && inner.contains("${")) {
                return AttrValue::Literal(inner.to_string());
            }
        }
    }
    AttrValue::Dynamic(expr.to_string())
}

/// The expression a `.map(` is called on, e.g. `items`, `data?.rows`,
/// `[1, 2, 3]`, `Array.from({ length: 5 })`.
fn receiver_before(src: &str, dot: usize) -> String {
    let bytes = src.as_bytes();
    let mut start = dot;
    loop {
        match start.checked_sub(1).map(|i| bytes[i]) {
            Some(b')' | b']') => {
                let Some(open) = matching_open(bytes, start - 1) else {
                    break;
                };
                start = open;
            }
            Some(c) if is_ident_char(c) || matches!(c, b'.' | b'?' | b'!') => start -= 1,
            _ => break,
        }
    }
    src[start..dot].trim().trim_end_matches(['?', '!']).to_string()
}

fn matching_open(bytes: &[u8], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match bytes[i] {
            b')' | b']' | b'}' => depth += 1,
            b'(' | b'[' | b'{' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn bound_of(receiver: &str) -> ListBound {
    let literal = receiver
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .filter(|inner| !inner.trim_start().starts_with("..."));
    if let Some(inner) = literal {
        let items = if inner.trim().is_empty() {
            0
        } else {
            top_level_commas(inner) + 1
        };
        return ListBound::Bounded(items);
    }
    LENGTH_RE
        .captures(receiver)
        .and_then(|c| c[1].parse().ok())
        .map_or(ListBound::Unbounded, ListBound::Bounded)
}

fn top_level_commas(s: &str) -> usize {
    let mut depth = 0i32;
    let mut count: usize = 0;
    for b in s.bytes() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth == 0 => count += 1,
            _ => {}
        }
    }
    // Trailing comma does not add an item.
    if s.trim_end().ends_with(',') {
        count = count.saturating_sub(1);
    }
    count
}
