// src/extract/fact.rs
//! The fact tree: one `ElementFact` per markup element, stored in an arena.

use super::script::ScriptFacts;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Index of a node in the arena. The synthetic root is always `ROOT`.
pub type NodeId = usize;
pub const ROOT: NodeId = 0;

/// Tags that are keyboard operable without extra wiring.
pub const INTERACTIVE_TAGS: &[&str] = &["button", "a", "input", "select", "textarea"];

/// Handlers that make any element interactive.
pub const INTERACTIVE_HANDLERS: &[&str] = &["onClick", "onKeyDown"];

/// Key handlers that pair with `onClick`.
pub const KEY_HANDLERS: &[&str] = &["onKeyDown", "onKeyUp", "onKeyPress"];

/// Value of an attribute as written in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttrValue {
    /// `name="text"`, `name={'text'}` or `name={3}`.
    Literal(String),
    /// Bare `name` (true) or `name={true|false}`.
    Flag(bool),
    /// `name={expr}`: present, but the value is unknown statically.
    Dynamic(String),
}

impl AttrValue {
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Raw expression text for dynamic values.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        match self {
            Self::Dynamic(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// How many items an iterated list can render, as far as the source shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListBound {
    Bounded(usize),
    Unbounded,
}

/// The `.map(...)` call an element was rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Iteration {
    pub receiver: String,
    pub bound: ListBound,
    /// Name of the callback's index parameter, e.g. `i` in `(item, i) =>`.
    pub index_param: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementFact {
    /// Empty for fragments and the synthetic root.
    pub tag: String,
    pub attributes: BTreeMap<String, AttrValue>,
    pub handlers: BTreeSet<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Literal text directly inside this element, whitespace-collapsed.
    pub text: String,
    /// Has a non-comment `{...}` child.
    pub dynamic_content: bool,
    /// Has a `{...props}` spread.
    pub spread: bool,
    pub iteration: Option<Iteration>,
    pub span: Span,
}

impl ElementFact {
    #[must_use]
    pub fn new(tag: impl Into<String>, span: Span) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            handlers: BTreeSet::new(),
            children: Vec::new(),
            parent: None,
            text: String::new(),
            dynamic_content: false,
            spread: false,
            iteration: None,
            span,
        }
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    #[must_use]
    pub fn has_any_attr(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.has_attr(n))
    }

    #[must_use]
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(AttrValue::literal)
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains(name)
    }

    #[must_use]
    pub fn has_any_handler(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.has_handler(n))
    }

    #[must_use]
    pub fn is_fragment(&self) -> bool {
        self.tag.is_empty()
    }

    /// User components (`<Icon>`, `<ui.Button>`) render unknown markup.
    #[must_use]
    pub fn is_component(&self) -> bool {
        self.tag.starts_with(|c: char| c.is_ascii_uppercase()) || self.tag.contains('.')
    }

    #[must_use]
    pub fn is_native_interactive(&self) -> bool {
        INTERACTIVE_TAGS.contains(&self.tag.as_str())
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.is_native_interactive() || self.has_any_handler(INTERACTIVE_HANDLERS)
    }

    /// Has text a screen reader could announce, or content that may be text.
    #[must_use]
    pub fn has_text_content(&self) -> bool {
        !self.text.is_empty() || self.dynamic_content
    }
}

/// Extracted structure of one component.
#[derive(Debug, Clone, Serialize)]
pub struct FactTree {
    nodes: Vec<ElementFact>,
    #[serde(skip)]
    by_tag: HashMap<String, Vec<NodeId>>,
    #[serde(skip)]
    interactive: Vec<NodeId>,
    pub script: ScriptFacts,
}

impl FactTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![ElementFact::new("", Span { line: 1, column: 1 })],
            by_tag: HashMap::new(),
            interactive: Vec::new(),
            script: ScriptFacts::default(),
        }
    }

    pub(crate) fn push(&mut self, parent: NodeId, mut fact: ElementFact) -> NodeId {
        let id = self.nodes.len();
        fact.parent = Some(parent);
        self.nodes.push(fact);
        self.nodes[parent].children.push(id);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut ElementFact {
        &mut self.nodes[id]
    }

    /// Builds the lookup indexes once the tree is complete.
    pub(crate) fn finish(mut self, script: ScriptFacts) -> Self {
        self.script = script;
        for (id, node) in self.nodes.iter().enumerate().skip(1) {
            self.by_tag.entry(node.tag.clone()).or_default().push(id);
            if node.is_interactive() {
                self.interactive.push(id);
            }
        }
        self
    }

    #[must_use]
    pub fn root(&self) -> &ElementFact {
        &self.nodes[ROOT]
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ElementFact> {
        self.nodes.get(id)
    }

    /// # Panics
    /// Panics if `id` did not come from this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ElementFact {
        &self.nodes[id]
    }

    /// Number of elements, excluding the synthetic root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All elements in document order, excluding the root.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementFact)> {
        self.nodes.iter().enumerate().skip(1)
    }

    #[must_use]
    pub fn by_tag(&self, tag: &str) -> &[NodeId] {
        self.by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn interactive(&self) -> &[NodeId] {
        &self.interactive
    }

    /// Parents of `id` from nearest to farthest, excluding the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.nodes.get(id).and_then(|n| n.parent);
        std::iter::from_fn(move || {
            let here = cur.filter(|&p| p != ROOT)?;
            cur = self.nodes[here].parent;
            Some(here)
        })
    }

    /// All nodes below `id` in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n].children.iter().rev());
        }
        out
    }

    /// The iteration this element or its nearest ancestor was rendered from.
    #[must_use]
    pub fn iteration_of(&self, id: NodeId) -> Option<&Iteration> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find_map(|n| self.nodes[n].iteration.as_ref())
    }

    /// Human location hint, e.g. `div > ul > li (line 7)`.
    #[must_use]
    pub fn path(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .map(|n| display_tag(&self.nodes[n].tag))
            .collect();
        parts.reverse();
        parts.push(display_tag(&self.nodes[id].tag));
        format!("{} (line {})", parts.join(" > "), self.nodes[id].span.line)
    }
}

fn display_tag(tag: &str) -> &str {
    if tag.is_empty() {
        "<>"
    } else {
        tag
    }
}
