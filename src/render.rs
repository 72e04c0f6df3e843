//! Converts Markdown text into an [`HtmlNode`] tree. The document is split
//! into blocks ([`crate::blocks`]), each block is classified and handed to a
//! dedicated builder, and every text-bearing run inside a block is tokenized
//! into inline spans ([`crate::inline`]).

use crate::blocks::{classify, markdown_to_blocks, BlockType};
use crate::htmlnode::{self, HtmlNode};
use crate::inline;
use crate::textspan::TextSpan;
use std::fmt;

/// Renders `markdown` into a `div` wrapping one node per block, in document
/// order. Rendering is all-or-nothing: the first failing block fails the
/// document.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode> {
    let children = markdown_to_blocks(markdown)
        .iter()
        .map(|block| block_to_html_node(block))
        .collect::<Result<Vec<HtmlNode>>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Renders `markdown` straight to an HTML string. See
/// [`markdown_to_html_node`].
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    Ok(markdown_to_html_node(markdown)?.serialize()?)
}

/// Renders a single block according to its [`BlockType`].
pub fn block_to_html_node(block: &str) -> Result<HtmlNode> {
    match classify(block) {
        BlockType::Paragraph => paragraph_to_html_node(block),
        BlockType::Heading => heading_to_html_node(block),
        BlockType::Code => Ok(code_to_html_node(block)),
        BlockType::Quote => quote_to_html_node(block),
        BlockType::UnorderedList => unordered_list_to_html_node(block),
        BlockType::OrderedList => ordered_list_to_html_node(block),
    }
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(inline::tokenize(text)?
        .iter()
        .map(TextSpan::to_html_node)
        .collect())
}

fn heading_to_html_node(block: &str) -> Result<HtmlNode> {
    let level = block.len() - block.trim_start_matches('#').len();
    let text = block[level..].trim();
    Ok(HtmlNode::parent(
        format!("h{}", level),
        text_to_children(text)?,
    ))
}

fn paragraph_to_html_node(block: &str) -> Result<HtmlNode> {
    let paragraph = block.split('\n').collect::<Vec<&str>>().join(" ");
    Ok(HtmlNode::parent("p", text_to_children(&paragraph)?))
}

// Code is never tokenized; the interior between the fences is emitted as
// raw text.
fn code_to_html_node(block: &str) -> HtmlNode {
    let interior = block.split("```").nth(1).unwrap_or_default();
    let interior = interior.strip_prefix('\n').unwrap_or(interior);
    let code = HtmlNode::parent("code", vec![TextSpan::plain(interior).to_html_node()]);
    HtmlNode::parent("pre", vec![code])
}

fn quote_to_html_node(block: &str) -> Result<HtmlNode> {
    let lines: Vec<&str> = block
        .split('\n')
        .map(|line| {
            let line = line.trim();
            match line.strip_prefix('>') {
                Some(rest) => rest.trim_start(),
                None => line,
            }
        })
        .filter(|line| !line.is_empty())
        .collect();
    let quote = lines.join(" ");
    Ok(HtmlNode::parent("blockquote", text_to_children(quote.trim())?))
}

fn unordered_list_to_html_node(block: &str) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")))
        .map(list_item)
        .collect::<Result<Vec<HtmlNode>>>()?;
    Ok(HtmlNode::parent("ul", items))
}

// Numbering was already checked by the classifier; here any run of digits
// followed by `. ` is accepted.
fn ordered_list_to_html_node(block: &str) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .map(str::trim)
        .filter_map(strip_ordered_marker)
        .map(list_item)
        .collect::<Result<Vec<HtmlNode>>>()?;
    Ok(HtmlNode::parent("ol", items))
}

fn strip_ordered_marker(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix(". ").filter(|text| !text.is_empty())
}

fn list_item(text: &str) -> Result<HtmlNode> {
    Ok(HtmlNode::parent("li", text_to_children(text)?))
}

/// The result of rendering Markdown.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering Markdown to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Returned when inline text cannot be tokenized.
    Inline(inline::Error),

    /// Returned when the rendered tree cannot be serialized.
    Html(htmlnode::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Inline(err) => err.fmt(f),
            Error::Html(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Inline(err) => Some(err),
            Error::Html(err) => Some(err),
        }
    }
}

impl From<inline::Error> for Error {
    /// Converts an [`inline::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for tokenizing.
    fn from(err: inline::Error) -> Error {
        Error::Inline(err)
    }
}

impl From<htmlnode::Error> for Error {
    /// Converts an [`htmlnode::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for serializing.
    fn from(err: htmlnode::Error) -> Error {
        Error::Html(err)
    }
}
