//! Defines [`TextSpan`], a run of inline text with a single style, and its
//! conversion into a leaf [`HtmlNode`].

use crate::htmlnode::HtmlNode;

/// The style of a [`TextSpan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// An immutable run of inline text. `target` holds the URL for
/// [`SpanKind::Link`] and [`SpanKind::Image`] spans and is `None` otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub content: String,
    pub kind: SpanKind,
    pub target: Option<String>,
}

impl TextSpan {
    /// Builds a span with no target.
    pub fn new<S: Into<String>>(content: S, kind: SpanKind) -> TextSpan {
        TextSpan {
            content: content.into(),
            kind,
            target: None,
        }
    }

    pub fn plain<S: Into<String>>(content: S) -> TextSpan {
        TextSpan::new(content, SpanKind::Plain)
    }

    pub fn link<S: Into<String>, U: Into<String>>(text: S, url: U) -> TextSpan {
        TextSpan {
            content: text.into(),
            kind: SpanKind::Link,
            target: Some(url.into()),
        }
    }

    pub fn image<S: Into<String>, U: Into<String>>(alt: S, url: U) -> TextSpan {
        TextSpan {
            content: alt.into(),
            kind: SpanKind::Image,
            target: Some(url.into()),
        }
    }

    /// Converts the span into a leaf node. Plain text becomes a tagless leaf
    /// so it is emitted without wrapping markup; images carry their alt text
    /// as an attribute and have an empty value.
    pub fn to_html_node(&self) -> HtmlNode {
        let target = || self.target.clone().unwrap_or_default();
        match self.kind {
            SpanKind::Plain => HtmlNode::text(self.content.as_str()),
            SpanKind::Bold => HtmlNode::leaf("b", self.content.as_str()),
            SpanKind::Italic => HtmlNode::leaf("i", self.content.as_str()),
            SpanKind::Code => HtmlNode::leaf("code", self.content.as_str()),
            SpanKind::Link => HtmlNode::leaf("a", self.content.as_str())
                .with_attributes(vec![("href".to_owned(), target())]),
            SpanKind::Image => HtmlNode::leaf("img", "").with_attributes(vec![
                ("src".to_owned(), target()),
                ("alt".to_owned(), self.content.clone()),
            ]),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::htmlnode::Result;
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_eq() {
        assert_eq!(
            TextSpan::new("This is a text node", SpanKind::Bold),
            TextSpan::new("This is a text node", SpanKind::Bold),
        );
    }

    #[test]
    fn test_not_eq_kind() {
        assert_ne!(
            TextSpan::new("This is a text node", SpanKind::Bold),
            TextSpan::new("This is a text node", SpanKind::Italic),
        );
    }

    #[test]
    fn test_not_eq_target() {
        assert_ne!(
            TextSpan::link("anchor", "https://a.example"),
            TextSpan::link("anchor", "https://b.example"),
        );
        assert_ne!(
            TextSpan::link("anchor", "https://a.example"),
            TextSpan::new("anchor", SpanKind::Link),
        );
    }

    #[test]
    fn test_plain_to_html() -> Result<()> {
        let node = TextSpan::plain("This is a text node").to_html_node();
        assert_eq!("This is a text node", node.serialize()?);
        Ok(())
    }

    #[test]
    fn test_styled_to_html() -> Result<()> {
        for (kind, wanted) in &[
            (SpanKind::Bold, "<b>x</b>"),
            (SpanKind::Italic, "<i>x</i>"),
            (SpanKind::Code, "<code>x</code>"),
        ] {
            assert_eq!(*wanted, TextSpan::new("x", *kind).to_html_node().serialize()?);
        }
        Ok(())
    }

    #[test]
    fn test_link_to_html() -> Result<()> {
        let node = TextSpan::link("boot dev", "https://www.boot.dev").to_html_node();
        assert_eq!(
            r#"<a href="https://www.boot.dev">boot dev</a>"#,
            node.serialize()?,
        );
        Ok(())
    }

    #[test]
    fn test_image_to_html() -> Result<()> {
        let node = TextSpan::image("a cat", "/images/cat.png").to_html_node();
        assert_eq!(
            r#"<img src="/images/cat.png" alt="a cat"></img>"#,
            node.serialize()?,
        );
        Ok(())
    }
}
