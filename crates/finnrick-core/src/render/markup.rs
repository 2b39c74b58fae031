//! Minimal typed HTML builder.
//!
//! Text and attribute values are escaped when written. The only way to emit
//! unescaped markup is [`Node::Trusted`], which accepts `&'static str` and
//! therefore cannot carry data fetched at runtime.

use std::fmt::{self, Write};

use html_escape::{encode_double_quoted_attribute, encode_text};

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    Trusted(&'static str),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn trusted(self, markup: &'static str) -> Self {
        self.child(Node::Trusted(markup))
    }

    pub fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, encode_double_quoted_attribute(value))?;
        }
        out.write_char('>')?;
        for child in &self.children {
            child.write_to(out)?;
        }
        write!(out, "</{}>", self.tag)
    }

    pub fn to_html(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

impl Node {
    pub fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Node::Element(element) => element.write_to(out),
            Node::Text(text) => out.write_str(&encode_text(text)),
            Node::Trusted(markup) => out.write_str(markup),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
