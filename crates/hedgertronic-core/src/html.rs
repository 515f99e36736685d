// Minimal owned HTML element tree.
//
// Pages are assembled as a tree of `Element`s and serialized once at the end.
// The tree stays mutable after construction so that interactive state (the
// stats category filter) can be applied to already-rendered markup.

use std::fmt::Write as _;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

// ---------------------------------------------------------------------------
// Node / Element
// ---------------------------------------------------------------------------

/// A child of an element: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An HTML element with classes, attributes, children and a hidden flag.
///
/// `hidden` is serialized as an inline `display: none` style so that toggling
/// visibility never adds or removes nodes from the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    hidden: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            hidden: false,
        }
    }

    // -- Builders --

    /// Add one or more whitespace-separated classes. Empty input is ignored.
    pub fn with_class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.set_class(name, true);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Shorthand for a `data-*` attribute.
    pub fn with_data(self, key: &str, value: &str) -> Self {
        self.with_attr(&format!("data-{key}"), value)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // -- Mutators --

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_text(&mut self, text: &str) {
        self.children.push(Node::Text(text.to_string()));
    }

    /// Replace all children with a single text run.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        self.children.push(Node::Text(text.to_string()));
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Add or remove a single class name.
    pub fn set_class(&mut self, name: &str, on: bool) {
        let present = self.has_class(name);
        if on && !present {
            self.classes.push(name.to_string());
        } else if !on && present {
            self.classes.retain(|c| c != name);
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    // -- Queries --

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// First element (pre-order, including `self`) matching `pred`.
    pub fn find<P>(&self, pred: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool + Copy,
    {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    /// All elements (pre-order, including `self`) matching `pred`.
    pub fn find_all<P>(&self, pred: P) -> Vec<&Element>
    where
        P: Fn(&Element) -> bool + Copy,
    {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    fn collect_matching<'a, P>(&'a self, pred: P, found: &mut Vec<&'a Element>)
    where
        P: Fn(&Element) -> bool + Copy,
    {
        if pred(self) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_matching(pred, found);
        }
    }

    /// Visit every element in pre-order, including `self`.
    pub fn for_each_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        f(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.for_each_mut(f);
            }
        }
    }

    // -- Serialization --

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if self.hidden {
            out.push_str(" style=\"display: none\"");
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
