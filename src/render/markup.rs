// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A minimal element tree.
//!
//! Builders produce detached [`Element`]s; the page attaches them under its mount points. Text is
//! stored raw and escaped only when the tree is serialized with [`Element::to_html`].

use smallvec::SmallVec;

use super::escape::push_escaped;

const VOID_TAGS: &[&str] = &["img", "br", "hr"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// A system-generated number (panel ordinals); never needs escaping.
    Number(usize),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    fn push_text_content(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.push_text_content(out);
                }
            }
            Self::Text(text) => out.push_str(text),
            Self::Number(n) => out.push_str(itoa::Buffer::new().format(*n)),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_html(out),
            Self::Text(text) => push_escaped(out, text),
            Self::Number(n) => out.push_str(itoa::Buffer::new().format(*n)),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    id: Option<String>,
    classes: SmallVec<[&'static str; 2]>,
    attrs: SmallVec<[(&'static str, String); 2]>,
    hidden: bool,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: SmallVec::new(),
            attrs: SmallVec::new(),
            hidden: false,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[&'static str] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn add_class(&mut self, class: &'static str) {
        if !self.has_class(class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| *c != class);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Replaces all children in one step.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    pub fn child_element(&self, index: usize) -> Option<&Element> {
        self.child_elements().nth(index)
    }

    pub fn child_element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.child_elements_mut().nth(index)
    }

    /// Depth-first search over this element and its descendants.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements_mut().find_map(|child| child.find_mut(pred))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|element: &Element| element.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_mut(&|element: &Element| element.id() == Some(id))
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|element: &Element| element.has_class(class))
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.find_mut(&|element: &Element| element.has_class(class))
    }

    pub fn count_class(&self, class: &str) -> usize {
        usize::from(self.has_class(class))
            + self
                .child_elements()
                .map(|child| child.count_class(class))
                .sum::<usize>()
    }

    /// Detaches the first descendant with the given id.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Element> {
        let position = self
            .children
            .iter()
            .position(|child| matches!(child, Node::Element(e) if e.id() == Some(id)));
        if let Some(position) = position {
            return match self.children.remove(position) {
                Node::Element(element) => Some(element),
                _ => None,
            };
        }
        self.child_elements_mut()
            .find_map(|child| child.remove_by_id(id))
    }

    /// Concatenated text of all descendants, like `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text_content(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if let Some(id) = &self.id {
            out.push_str(" id=\"");
            push_escaped(out, id);
            out.push('"');
        }
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            for (i, class) in self.classes.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(class);
            }
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            push_escaped(out, value);
            out.push('"');
        }
        if self.hidden {
            out.push_str(" hidden");
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, Node};

    fn sample() -> Element {
        Element::new("div")
            .with_id("root")
            .with_child(
                Element::new("ul")
                    .with_class("list")
                    .with_child(Element::new("li").with_id("one").with_text("1"))
                    .with_child(Element::new("li").with_id("two").with_text("2")),
            )
            .with_child(Node::Number(3))
    }

    #[test]
    fn serializes_attributes_in_stable_order() {
        let html = Element::new("p")
            .with_id("x")
            .with_class("a")
            .with_class("b")
            .with_attr("data-id", "1")
            .with_hidden(true)
            .with_text("hi")
            .to_html();
        assert_eq!(html, r#"<p id="x" class="a b" data-id="1" hidden>hi</p>"#);
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let html = Element::new("span")
            .with_attr("title", "\"q\"")
            .with_text("<b>&")
            .to_html();
        assert_eq!(html, r#"<span title="&quot;q&quot;">&lt;b&gt;&amp;</span>"#);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = Element::new("img").with_attr("src", "a.png").to_html();
        assert_eq!(html, r#"<img src="a.png">"#);
    }

    #[test]
    fn text_content_includes_numbers() {
        assert_eq!(sample().text_content(), "123");
    }

    #[test]
    fn remove_by_id_detaches_nested_elements() {
        let mut root = sample();
        let removed = root.remove_by_id("two").unwrap();
        assert_eq!(removed.text_content(), "2");
        assert!(root.find_by_id("two").is_none());
        assert!(root.remove_by_id("two").is_none());
    }

    #[test]
    fn classes_are_deduplicated() {
        let mut element = Element::new("button").with_class("nav-btn");
        element.add_class("active");
        element.add_class("active");
        assert_eq!(element.classes(), ["nav-btn", "active"]);
        element.remove_class("active");
        assert_eq!(element.classes(), ["nav-btn"]);
    }

    #[test]
    fn count_class_walks_descendants() {
        assert_eq!(sample().count_class("list"), 1);
    }
}
