//! Splits a Markdown document into blocks and classifies each block by its
//! textual shape. Blocks are plain strings; their [`BlockType`] is derived on
//! demand by [`classify`].

/// Heading markers, from `h1` through `h6`. Each must be followed by a space.
const HEADING_MARKERS: [&str; 6] = ["# ", "## ", "### ", "#### ", "##### ", "###### "];

const CODE_FENCE: &str = "```";

/// The block-level structures understood by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    OrderedList,
    UnorderedList,
}

/// Returns whether `line` starts with one to six `#` followed by a space.
pub fn is_heading(line: &str) -> bool {
    HEADING_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// Splits `markdown` into blocks in document order.
///
/// Blocks are separated by blank lines and trimmed of surrounding whitespace;
/// empty blocks are dropped. Heading lines are paragraph-breaking: within a
/// block, every heading line is emitted as its own single-line block and the
/// lines around it are flushed as separate blocks.
pub fn markdown_to_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    for block in markdown.split("\n\n").map(str::trim) {
        if block.is_empty() {
            continue;
        }

        let mut group: Vec<&str> = Vec::new();
        for line in block.lines() {
            if is_heading(line) {
                flush(&mut blocks, &mut group);
                blocks.push(line.trim().to_owned());
            } else {
                group.push(line);
            }
        }
        flush(&mut blocks, &mut group);
    }
    blocks
}

fn flush(blocks: &mut Vec<String>, group: &mut Vec<&str>) {
    let joined = group.join("\n");
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_owned());
    }
    group.clear();
}

/// Classifies a block. Rules are checked in precedence order and the first
/// match wins; quotes and lists require every line to conform, otherwise the
/// block is a [`BlockType::Paragraph`].
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.split('\n').collect();

    if is_heading(block) {
        return BlockType::Heading;
    }
    if lines.len() > 1
        && lines[0].starts_with(CODE_FENCE)
        && lines[lines.len() - 1].starts_with(CODE_FENCE)
    {
        return BlockType::Code;
    }
    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }
    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
    {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}
