//! The library code for the `mdsite` static site generator. The architecture
//! can be generally broken down into two distinct steps:
//!
//! 1. Rendering Markdown documents into HTML ([`crate::render`])
//! 2. Assembling and writing pages to disk ([`crate::page`], [`crate::build`])
//!
//! Of the two, the first step is the more involved. It is itself composed of
//! three distinct sub-steps:
//!
//! 1. Segmenting the document into blocks and classifying each one
//!    ([`crate::blocks`])
//! 2. Tokenizing the text inside each block into styled spans
//!    ([`crate::inline`], [`crate::textspan`])
//! 3. Building an [`htmlnode::HtmlNode`] tree from the blocks and spans and
//!    serializing it
//!
//! The grammar is a deliberately small practical subset of Markdown: emphasis
//! is not nested, text is not HTML-escaped, and quotes and lists are only
//! recognised when every line of the block conforms.
//!
//! The second step is pretty straight-forward: for each Markdown file in the
//! content tree, render it, substitute its title and body into the template,
//! rewrite root-relative links for the configured base path, and write the
//! result to disk.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod blocks;
pub mod build;
pub mod config;
pub mod htmlnode;
pub mod inline;
pub mod page;
pub mod render;
pub mod textspan;

pub use render::markdown_to_html_node;
