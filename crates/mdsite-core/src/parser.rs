//! Document assembler.
//!
//! Drives the segmenter and builds one `div` element per document, with one
//! child subtree per block. Any error while lexing or mapping a block aborts
//! the whole document.

use std::borrow::Cow;

use crate::element::{Element, Parent};
use crate::error::{ConvertError, Result};
use crate::inline::text_to_elements;
use crate::lexer::{self, Block, BlockType};

/// Value of the untagged leaf appended after each quote line.
pub const LINE_BREAK: &str = "<br>";

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Markdown to element-tree converter.
///
/// The parser holds no state between documents; it is a named entry point
/// so callers can keep one around and reuse it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Convert `input` to a root `div` element.
    pub fn parse(&self, input: &str) -> Result<Element> {
        let source = lexer::normalize_newlines(input);
        let blocks = lexer::segment(&source);

        let mut children = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let block_type = block.block_type();
            log::trace!(
                "block {}..{} classified as {}",
                block.span.start,
                block.span.end,
                block_type.as_str()
            );
            self.build_block(block, block_type, &mut children)?;
        }

        log::debug!(
            "assembled document: {} blocks, {} elements",
            blocks.len(),
            children.len()
        );

        Ok(Element::parent("div", children))
    }

    fn build_block(
        &self,
        block: &Block<'_>,
        block_type: BlockType,
        out: &mut Vec<Element>,
    ) -> Result<()> {
        let units = inline_units(block, block_type);

        match block_type {
            BlockType::Code => out.push(self.build_code(block)),
            BlockType::Heading => {
                let level = lexer::heading_level(block.text).unwrap_or(1);
                let tag = HEADING_TAGS[usize::from(level.clamp(1, 6)) - 1];
                for unit in &units {
                    out.push(Element::parent(tag, text_to_elements(unit)?));
                }
            }
            BlockType::UnorderedList => out.push(self.build_list("ul", &units)?),
            BlockType::OrderedList => out.push(self.build_list("ol", &units)?),
            BlockType::Quote => {
                let mut quote = Parent::new("blockquote", Vec::with_capacity(units.len() * 2));
                for unit in &units {
                    for child in text_to_elements(unit)? {
                        quote.push(child);
                    }
                    quote.push(Element::text(LINE_BREAK));
                }
                out.push(Element::Parent(quote));
            }
            BlockType::Paragraph => {
                let mut children = Vec::new();
                for unit in &units {
                    children.extend(text_to_elements(unit)?);
                }
                out.push(Element::parent("p", children));
            }
        }
        Ok(())
    }

    /// Code blocks keep their content verbatim; no inline lexing.
    fn build_code(&self, block: &Block<'_>) -> Element {
        let text = block.text;
        let content = text
            .get(3..text.len().saturating_sub(3))
            .unwrap_or_default();
        Element::parent("pre", vec![Element::leaf("code", content)])
    }

    fn build_list(&self, tag: &str, units: &[Cow<'_, str>]) -> Result<Element> {
        let items = units
            .iter()
            .map(|unit| Ok(Element::parent("li", text_to_elements(unit)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Element::parent(tag, items))
    }
}

/// The pieces of a block that are inline-lexed, with block markers removed.
///
/// - heading, list and quote blocks: one unit per line, with the `#` run,
///   list marker or `>` stripped (quote lines are also trimmed)
/// - paragraphs: a single unit, the lines joined with a space
/// - code blocks: none
///
/// Every line of a heading block is a separate heading at the level of the
/// block's first line.
pub fn inline_units<'a>(block: &Block<'a>, block_type: BlockType) -> Vec<Cow<'a, str>> {
    let strip: fn(&str) -> &str = match block_type {
        BlockType::Code => return Vec::new(),
        BlockType::Paragraph => {
            let text = if block.text.contains('\n') {
                Cow::Owned(block.lines().collect::<Vec<_>>().join(" "))
            } else {
                Cow::Borrowed(block.text)
            };
            return vec![text];
        }
        BlockType::Heading => strip_heading,
        BlockType::UnorderedList => strip_bullet,
        BlockType::OrderedList => strip_ordinal,
        BlockType::Quote => strip_quote,
    };
    block.lines().map(|line| Cow::Borrowed(strip(line))).collect()
}

fn strip_heading(line: &str) -> &str {
    let rest = line.trim_start_matches('#');
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix("- ").unwrap_or(line)
}

fn strip_ordinal(line: &str) -> &str {
    lexer::ordered_marker_len(line).map_or(line, |len| &line[len..])
}

fn strip_quote(line: &str) -> &str {
    line.strip_prefix('>').unwrap_or(line).trim()
}

/// Return the text of the first line that starts with `# `, without that
/// prefix.
pub fn extract_title(markdown: &str) -> Result<&str> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .ok_or(ConvertError::MissingTitle)
}
