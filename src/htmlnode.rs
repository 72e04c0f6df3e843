//! Defines the [`HtmlNode`] tree that the renderer builds and the logic for
//! serializing it to markup. A node is either a [`HtmlNode::Leaf`] (a tag
//! wrapping a single text value, or raw text when the tag is unset) or a
//! [`HtmlNode::Parent`] (a tag wrapping an ordered list of child nodes).
//!
//! Fields are optional so that a malformed node can still be represented;
//! serializing one fails with the matching [`Error`] variant rather than
//! producing broken markup.

use std::fmt;

/// An ordered list of `key="value"` attribute pairs. Serialization follows
/// insertion order.
pub type Attributes = Vec<(String, String)>;

/// A node in an HTML element tree. Each node exclusively owns its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlNode {
    /// A single element wrapping a text value. When `tag` is `None` the value
    /// is emitted verbatim without any wrapping element.
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Option<Attributes>,
    },

    /// An element wrapping child nodes. `children` being `None` is distinct
    /// from it being empty: the former is an error, the latter renders as
    /// `<tag></tag>`.
    Parent {
        tag: Option<String>,
        children: Option<Vec<HtmlNode>>,
        attributes: Option<Attributes>,
    },
}

impl HtmlNode {
    /// Builds a tagless leaf which serializes to `value` unchanged.
    pub fn text<S: Into<String>>(value: S) -> HtmlNode {
        HtmlNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: None,
        }
    }

    /// Builds a leaf element, e.g. `<b>value</b>`.
    pub fn leaf<T: Into<String>, S: Into<String>>(tag: T, value: S) -> HtmlNode {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: None,
        }
    }

    /// Builds a parent element around `children`.
    pub fn parent<T: Into<String>>(tag: T, children: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Parent {
            tag: Some(tag.into()),
            children: Some(children),
            attributes: None,
        }
    }

    /// Returns the node with its attributes replaced by `attributes`.
    pub fn with_attributes(self, attributes: Attributes) -> HtmlNode {
        match self {
            HtmlNode::Leaf { tag, value, .. } => HtmlNode::Leaf {
                tag,
                value,
                attributes: Some(attributes),
            },
            HtmlNode::Parent { tag, children, .. } => HtmlNode::Parent {
                tag,
                children,
                attributes: Some(attributes),
            },
        }
    }

    /// Serializes the node and all of its descendants to an HTML string.
    pub fn serialize(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf {
                tag,
                value,
                attributes,
            } => {
                let value = value.as_ref().ok_or(Error::MissingValue)?;
                match tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(out, tag, attributes.as_ref());
                        out.push_str(value);
                        close_tag(out, tag);
                    }
                }
            }
            HtmlNode::Parent {
                tag,
                children,
                attributes,
            } => {
                let tag = tag.as_ref().ok_or(Error::MissingTag)?;
                let children = children.as_ref().ok_or(Error::MissingChildren)?;
                open_tag(out, tag, attributes.as_ref());
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

/// Renders attributes as ` key="value"` pairs in insertion order. Unset or
/// empty attributes render as the empty string.
pub fn serialize_attributes(attributes: Option<&Attributes>) -> String {
    let mut out = String::new();
    push_attributes(&mut out, attributes);
    out
}

fn push_attributes(out: &mut String, attributes: Option<&Attributes>) {
    for (key, value) in attributes.into_iter().flatten() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

fn open_tag(out: &mut String, tag: &str, attributes: Option<&Attributes>) {
    out.push('<');
    out.push_str(tag);
    push_attributes(out, attributes);
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// The result of serializing an [`HtmlNode`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a malformed [`HtmlNode`]. These indicate a bug in whatever
/// constructed the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Returned when a [`HtmlNode::Leaf`] has no value.
    MissingValue,

    /// Returned when a [`HtmlNode::Parent`] has no tag.
    MissingTag,

    /// Returned when a [`HtmlNode::Parent`] has no children list.
    MissingChildren,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingValue => write!(f, "all leaf nodes must have a value"),
            Error::MissingTag => write!(f, "invalid HTML: parent node has no tag"),
            Error::MissingChildren => {
                write!(f, "invalid HTML: parent node has no children")
            }
        }
    }
}

impl std::error::Error for Error {}
