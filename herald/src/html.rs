//! View tree produced by [`crate::View::render`].
//!
//! The same tree is serialized to markup on the server and turned into DOM
//! nodes in the browser. Event listeners travel with the tree but are never
//! serialized.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use herald_utils::{escape_attr, escape_text};

use crate::action::Action;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in the view tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// An HTML element with attributes, children and event listeners.
#[derive(Clone, Default)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
    listeners: BTreeMap<String, Action>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set attribute `name`. Values are escaped on output, names are not.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains whitespace, a quote, `=`, `<`,
    /// `>` or `/`.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !is_valid_attribute_name(&name) {
            panic!("Invalid attribute name '{name}'");
        }
        self.attributes.insert(name, value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Attach a listener for `event`, replacing any earlier one.
    pub fn on<F: Fn() + 'static>(self, event: impl Into<String>, handler: F) -> Self {
        self.on_action(event, Rc::new(handler))
    }

    pub fn on_action(mut self, event: impl Into<String>, action: Action) -> Self {
        self.listeners.insert(event.into(), action);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn listeners(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.listeners
            .iter()
            .map(|(event, action)| (event.as_str(), action))
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Run the listener registered for `event`.
    ///
    /// Returns whether a listener ran.
    pub fn trigger(&self, event: &str) -> bool {
        match self.listeners.get(event) {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

// Closures cannot be compared, so listeners only count by event name.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.attributes == other.attributes
            && self.children == other.children
            && self.listeners.keys().eq(other.listeners.keys())
    }
}

/// A fragment of sibling nodes; the output of a render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Html {
    nodes: Vec<Node>,
}

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// First element with the given tag, depth first.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        find_in(&self.nodes, tag)
    }

    /// Every element with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        find_all_in(&self.nodes, tag, &mut found);
        found
    }
}

impl From<Vec<Node>> for Html {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl From<Element> for Html {
    fn from(element: Element) -> Self {
        Self::new().child(element)
    }
}

impl From<&str> for Html {
    fn from(text: &str) -> Self {
        Self::new().child(text)
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write_node(f, node)?;
        }
        Ok(())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{}\"", escape_attr(value))?;
        }
        write!(f, ">")?;

        if self.is_void() {
            return Ok(());
        }

        for child in &self.children {
            write_node(f, child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|ch| {
            ch.is_whitespace()
                || ch.is_control()
                || matches!(ch, '"' | '\'' | '=' | '<' | '>' | '/')
        })
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    match node {
        Node::Element(element) => fmt::Display::fmt(element, f),
        Node::Text(text) => f.write_str(&escape_text(text)),
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(element) => collect_text(&element.children, out),
            Node::Text(text) => out.push_str(text),
        }
    }
}

fn find_in<'a>(nodes: &'a [Node], tag: &str) -> Option<&'a Element> {
    nodes.iter().find_map(|node| {
        let element = node.as_element()?;
        if element.tag == tag {
            Some(element)
        } else {
            find_in(&element.children, tag)
        }
    })
}

fn find_all_in<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
    for element in nodes.iter().filter_map(Node::as_element) {
        if element.tag == tag {
            found.push(element);
        }
        find_all_in(&element.children, tag, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_text() {
        assert_eq!(Html::from("Hello, world!").to_string(), "Hello, world!");
    }

    #[test]
    fn test_element() {
        let html = Html::from(Element::new("div").text("Hello, world!"));
        assert_eq!(html.to_string(), "<div>Hello, world!</div>");
    }

    #[test]
    fn test_element_with_attributes() {
        let html = Html::from(
            Element::new("div")
                .attr("id", "test")
                .attr("class", "test")
                .text("Hello, world!"),
        );

        assert_eq!(
            html.to_string(),
            "<div class=\"test\" id=\"test\">Hello, world!</div>"
        );
    }

    #[test]
    fn test_fragment_and_nesting() {
        let html = Html::new()
            .child(Element::new("h1").text("Title"))
            .child(Element::new("div").child(Element::new("p").text("one")));

        assert_eq!(html.to_string(), "<h1>Title</h1><div><p>one</p></div>");
        assert_eq!(html.find("div").map(Element::text_content).as_deref(), Some("one"));
    }

    #[test]
    fn test_escaping() {
        let html = Html::from(
            Element::new("p")
                .attr("title", "\"quoted\" & <tag>")
                .text("<script>alert(1)</script>"),
        );

        assert_eq!(
            html.to_string(),
            "<p title=\"&quot;quoted&quot; &amp; &lt;tag&gt;\">&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_attribute_names() {
        assert!(is_valid_attribute_name("data-count"));
        assert!(is_valid_attribute_name("aria-label"));
        assert!(!is_valid_attribute_name(""));
        assert!(!is_valid_attribute_name("a b"));
        assert!(!is_valid_attribute_name("x\"onclick"));
        assert!(!is_valid_attribute_name("x>"));
    }

    #[test]
    #[should_panic(expected = "Invalid attribute name")]
    fn test_attr_rejects_markup_in_name() {
        let _ = Element::new("p").attr("title\" onclick=\"alert(1)", "x");
    }

    #[test]
    fn test_void_elements() {
        let html = Html::from(Element::new("link").attr("rel", "stylesheet"));
        assert_eq!(html.to_string(), "<link rel=\"stylesheet\">");
    }

    #[test]
    fn test_listeners_are_not_serialized() {
        let html = Html::from(Element::new("button").on("click", || {}).text("go"));
        assert_eq!(html.to_string(), "<button>go</button>");
    }

    #[test]
    fn test_trigger() {
        let clicks = Rc::new(Cell::new(0));
        let clicks_clone = Rc::clone(&clicks);
        let button = Element::new("button").on("click", move || clicks_clone.set(clicks_clone.get() + 1));

        assert!(button.trigger("click"));
        assert!(button.trigger("click"));
        assert!(!button.trigger("mouseover"));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_find() {
        let html = Html::new()
            .child(Element::new("h1").text("Title"))
            .child(
                Element::new("div")
                    .child(Element::new("p").text("first"))
                    .child(Element::new("p").text("second")),
            );

        assert_eq!(html.find("h1").map(Element::text_content).as_deref(), Some("Title"));
        assert_eq!(html.find("p").map(Element::text_content).as_deref(), Some("first"));
        assert!(html.find("span").is_none());

        let texts: Vec<String> = html.find_all("p").into_iter().map(Element::text_content).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_equality_ignores_listener_identity() {
        let a = Element::new("button").on("click", || {}).text("x");
        let b = Element::new("button").on("click", || {}).text("x");
        let c = Element::new("button").text("x");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
