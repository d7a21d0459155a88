//! Block segmenter.
//!
//! A document is split into blocks on every `"\n\n"` separator. Each chunk is
//! trimmed and empty chunks are dropped, so a block is a run of non-blank
//! lines. Blocks borrow from the source and remember their byte span.
//!
//! [`classify`] then assigns each block one [`BlockType`] by looking at its
//! lines. Classification is total: anything that is not recognised is a
//! paragraph.

use std::borrow::Cow;

use memchr::{memchr, memmem};

use crate::span::Span;

/// Block classification, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
            BlockType::Paragraph => "paragraph",
        }
    }
}

/// A trimmed, non-empty run of lines from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub text: &'a str,
    /// Byte span of `text` in the segmented source.
    pub span: Span,
}

impl<'a> Block<'a> {
    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.text.split('\n')
    }

    #[inline]
    pub fn block_type(&self) -> BlockType {
        classify(self)
    }
}

/// Replace `\r\n` line endings with `\n`.
///
/// Segmentation only recognises `"\n\n"`, so CRLF documents are normalized
/// before they are segmented. Borrows when there is nothing to replace.
pub fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if memchr(b'\r', input.as_bytes()).is_some() {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Split a document into blocks.
pub fn segment(input: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::with_capacity(16);
    let mut chunk_start = 0;

    for sep in memmem::find_iter(input.as_bytes(), b"\n\n") {
        push_block(&mut blocks, input, chunk_start, sep);
        chunk_start = sep + 2;
    }
    push_block(&mut blocks, input, chunk_start, input.len());

    blocks
}

#[inline]
fn push_block<'a>(blocks: &mut Vec<Block<'a>>, input: &'a str, start: usize, end: usize) {
    let chunk = &input[start..end];
    let text = chunk.trim();
    if text.is_empty() {
        return;
    }
    let text_start = start + (chunk.len() - chunk.trim_start().len());
    blocks.push(Block {
        text,
        span: Span::from_range(text_start, text_start + text.len()),
    });
}

/// Classify a block. The first matching rule wins:
///
/// 1. heading: starts with 1-6 `#` then a space
/// 2. code: starts and ends with ```` ``` ```` with no backtick in between
/// 3. quote: every line starts with `>`
/// 4. unordered list: every line starts with `- `
/// 5. ordered list: every line starts with digits then `. `
/// 6. paragraph
pub fn classify(block: &Block<'_>) -> BlockType {
    let text = block.text;

    if heading_level(text).is_some() {
        return BlockType::Heading;
    }
    if is_code_fence(text) {
        return BlockType::Code;
    }
    if block.lines().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if block.lines().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }
    if block.lines().all(|line| ordered_marker_len(line).is_some()) {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Number of leading `#` when `text` starts with 1-6 of them and a space.
pub fn heading_level(text: &str) -> Option<u8> {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && text.as_bytes().get(hashes) == Some(&b' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Length of a `<digits>. ` prefix, if `line` has one.
///
/// The number itself is not checked, so `7. ` or `1234. ` are accepted
/// anywhere in a list.
pub fn ordered_marker_len(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with(". ") {
        Some(digits + 2)
    } else {
        None
    }
}

fn is_code_fence(text: &str) -> bool {
    text.len() >= 6
        && text.starts_with("```")
        && text.ends_with("```")
        && memchr(b'`', text[3..text.len() - 3].as_bytes()).is_none()
}
