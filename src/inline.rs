//! Splits a line of text into styled [`TextSpan`]s.
//!
//! Tokenizing is layered and each layer only subdivides spans that are still
//! [`SpanKind::Plain`]:
//!
//! 1. Delimiter splitting for every entry in [`DELIMITERS`], in order.
//! 2. Image extraction (`![alt](url)`).
//! 3. Link extraction (`[text](url)`), skipping anything preceded by `!`.
//!
//! Images must be extracted before links because a link's syntax is an
//! image's syntax minus the leading `!`.

use crate::textspan::{SpanKind, TextSpan};
use regex::Regex;
use std::fmt;

/// Delimiters in the order they are split, each mapped to the style of the
/// text it encloses.
pub const DELIMITERS: &[(&str, SpanKind)] = &[
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

lazy_static::lazy_static! {
    static ref IMAGE_PATTERN: Regex =
        Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap();

    static ref LINK_PATTERN: Regex =
        Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap();
}

/// Converts `text` into an ordered list of spans.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    let mut spans = vec![TextSpan::plain(text)];
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, *kind)?;
    }
    Ok(split_links(split_images(spans)))
}

/// Splits every plain span on `delimiter`. Parts alternate plain and `kind`
/// starting with plain; empty parts are dropped. A plain span with an odd
/// number of delimiters is unbalanced and fails the whole split.
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut result = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            result.push(span);
            continue;
        }

        let parts: Vec<&str> = span.content.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnbalancedDelimiter {
                delimiter: delimiter.to_owned(),
                text: span.content.clone(),
            });
        }

        result.extend(
            parts
                .into_iter()
                .enumerate()
                .filter(|(_, part)| !part.is_empty())
                .map(|(i, part)| match i % 2 {
                    0 => TextSpan::plain(part),
                    _ => TextSpan::new(part, kind),
                }),
        );
    }
    Ok(result)
}

/// Returns the `(alt, url)` pair of every `![alt](url)` in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    to_pairs(find_images(text))
}

/// Returns the `(text, url)` pair of every `[text](url)` in `text` that is
/// not part of an image.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    to_pairs(find_links(text))
}

/// Pulls images out of every plain span.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, find_images, |alt, url| TextSpan::image(alt, url))
}

/// Pulls links out of every plain span.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, find_links, |text, url| TextSpan::link(text, url))
}

/// A link or image located in a haystack.
struct Match<'t> {
    start: usize,
    end: usize,
    text: &'t str,
    url: &'t str,
}

fn find_images(text: &str) -> Vec<Match<'_>> {
    IMAGE_PATTERN
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            Match {
                start: whole.start(),
                end: whole.end(),
                text: caps.get(1).map_or("", |m| m.as_str()),
                url: caps.get(2).map_or("", |m| m.as_str()),
            }
        })
        .collect()
}

fn find_links(text: &str) -> Vec<Match<'_>> {
    let mut matches = Vec::new();
    let mut pos = 0;
    while let Some(caps) = LINK_PATTERN.captures_at(text, pos) {
        let whole = caps.get(0).unwrap();
        // `[` is one byte, so `start + 1` is always a char boundary.
        if text[..whole.start()].ends_with('!') {
            pos = whole.start() + 1;
            continue;
        }
        matches.push(Match {
            start: whole.start(),
            end: whole.end(),
            text: caps.get(1).map_or("", |m| m.as_str()),
            url: caps.get(2).map_or("", |m| m.as_str()),
        });
        pos = whole.end();
    }
    matches
}

fn to_pairs(matches: Vec<Match<'_>>) -> Vec<(String, String)> {
    matches
        .into_iter()
        .map(|m| (m.text.to_owned(), m.url.to_owned()))
        .collect()
}

fn split_matches(
    spans: Vec<TextSpan>,
    find: fn(&str) -> Vec<Match<'_>>,
    build: fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    let mut result = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            result.push(span);
            continue;
        }

        let text = span.content.as_str();
        let mut cursor = 0;
        for m in find(text) {
            if m.start > cursor {
                result.push(TextSpan::plain(&text[cursor..m.start]));
            }
            result.push(build(m.text, m.url));
            cursor = m.end;
        }
        if cursor < text.len() {
            result.push(TextSpan::plain(&text[cursor..]));
        }
    }
    result
}

/// The result of tokenizing inline text.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error tokenizing inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Returned when a delimiter is opened but never closed.
    UnbalancedDelimiter { delimiter: String, text: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnbalancedDelimiter { delimiter, text } => write!(
                f,
                "unbalanced `{}` delimiter in {:?}; maybe close the delimiter?",
                delimiter, text
            ),
        }
    }
}

impl std::error::Error for Error {}
