//! Tests for block segmentation and classification

use mdsite_core::lexer::{
    classify, heading_level, normalize_newlines, ordered_marker_len, segment,
};
use mdsite_core::span::Span;
use mdsite_core::BlockType;

fn texts(input: &str) -> Vec<&str> {
    segment(input).into_iter().map(|b| b.text).collect()
}

fn block_type(input: &str) -> BlockType {
    let blocks = segment(input);
    assert_eq!(blocks.len(), 1, "expected one block in {input:?}");
    classify(&blocks[0])
}

// ============================================================================
// Segmentation Tests
// ============================================================================

#[test]
fn test_segment_paragraphs_and_list() {
    let md = "
This is **bolded** paragraph

This is another paragraph with _italic_ text and `code` here
This is the same paragraph on a new line

- This is a list
- with items
";
    assert_eq!(
        texts(md),
        vec![
            "This is **bolded** paragraph",
            "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line",
            "- This is a list\n- with items",
        ]
    );
}

#[test]
fn test_segment_drops_excess_blank_lines() {
    let md = "first\n\n\n\n\n\n\nsecond\n\n\n";
    assert_eq!(texts(md), vec!["first", "second"]);
}

#[test]
fn test_segment_never_yields_empty_blocks() {
    for input in ["", "\n", "\n\n", "   \n\n  \n\n\t", "a\n\n \n\nb"] {
        for block in segment(input) {
            assert!(!block.text.is_empty(), "empty block from {input:?}");
            assert_eq!(block.text, block.text.trim());
        }
    }
    assert!(segment("\n\n\n\n").is_empty());
}

#[test]
fn test_segment_spans_point_into_source() {
    let md = "  # Title  \n\nbody text\n";
    let blocks = segment(md);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].span, Span::new(2, 9));
    assert_eq!(blocks[0].span.slice(md), "# Title");
    assert_eq!(blocks[1].span.slice(md), "body text");
}

#[test]
fn test_span_from_range_saturates_large_offsets() {
    assert_eq!(Span::from_range(3, 8), Span::new(3, 8));
    let huge = u32::MAX as usize + 10;
    assert_eq!(Span::from_range(5, huge), Span::new(5, u32::MAX));
    assert_eq!(Span::from_range(huge, huge), Span::new(u32::MAX, u32::MAX));
}

#[test]
fn test_segment_rejoin_reconstructs_trimmed_document() {
    let md = "# Heading\n\nparagraph one\nline two\n\n- a\n- b";
    let rejoined = texts(md).join("\n\n");
    assert_eq!(rejoined, md);
}

#[test]
fn test_normalize_newlines() {
    assert_eq!(normalize_newlines("a\r\n\r\nb"), "a\n\nb");
    assert!(matches!(
        normalize_newlines("a\n\nb"),
        std::borrow::Cow::Borrowed(_)
    ));
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_classify_headings() {
    for level in 1..=6 {
        let input = format!("{} Heading", "#".repeat(level));
        assert_eq!(block_type(&input), BlockType::Heading);
        assert_eq!(heading_level(&input), Some(level as u8));
    }
}

#[test]
fn test_classify_not_headings() {
    assert_eq!(block_type("####### Seven"), BlockType::Paragraph);
    assert_eq!(block_type("#NoSpace"), BlockType::Paragraph);
    assert_eq!(heading_level("####### Seven"), None);
    assert_eq!(heading_level("#NoSpace"), None);
}

#[test]
fn test_classify_code() {
    assert_eq!(block_type("```code here```"), BlockType::Code);
    assert_eq!(block_type("```\nfn main() {}\n```"), BlockType::Code);
    assert_eq!(block_type("``````"), BlockType::Code);
}

#[test]
fn test_classify_code_rejects_inner_backticks() {
    assert_eq!(block_type("```a `b` c```"), BlockType::Paragraph);
    assert_eq!(block_type("```unterminated"), BlockType::Paragraph);
    assert_eq!(block_type("````"), BlockType::Paragraph);
}

#[test]
fn test_classify_quote() {
    assert_eq!(block_type("> one\n> two\n>three"), BlockType::Quote);
    assert_eq!(block_type("> one\ntwo"), BlockType::Paragraph);
}

#[test]
fn test_classify_unordered_list() {
    assert_eq!(block_type("- a\n- b\n- c"), BlockType::UnorderedList);
    assert_eq!(block_type("- a\n-b"), BlockType::Paragraph);
    assert_eq!(block_type("- a\nb"), BlockType::Paragraph);
}

#[test]
fn test_classify_ordered_list() {
    assert_eq!(block_type("1. a\n2. b\n3. c"), BlockType::OrderedList);
    assert_eq!(block_type("1. a\n1. b\n1234. c"), BlockType::OrderedList);
    assert_eq!(block_type("3. a\n1. b"), BlockType::OrderedList);
    assert_eq!(block_type("1. a\n2) b"), BlockType::Paragraph);
    assert_eq!(block_type("1.a"), BlockType::Paragraph);
}

#[test]
fn test_ordered_marker_len() {
    assert_eq!(ordered_marker_len("1. item"), Some(3));
    assert_eq!(ordered_marker_len("1234. item"), Some(6));
    assert_eq!(ordered_marker_len(". item"), None);
    assert_eq!(ordered_marker_len("a. item"), None);
}

#[test]
fn test_classify_precedence() {
    // Heading wins over everything else.
    assert_eq!(block_type("# title\n- item"), BlockType::Heading);
    // Quote is checked before lists.
    assert_eq!(block_type(">- a\n>- b"), BlockType::Quote);
}

#[test]
fn test_classify_is_total() {
    let inputs = [
        "plain",
        "#",
        ">",
        "-",
        "1.",
        "```",
        "a\nb\nc",
        "<div>html</div>",
        "| a | b |",
    ];
    for input in inputs {
        for block in segment(input) {
            // Every block gets exactly one type; paragraphs are the fallback.
            let _ = classify(&block);
        }
    }
    assert_eq!(block_type("| a | b |"), BlockType::Paragraph);
}

#[test]
fn test_block_type_method_matches_classify() {
    for block in segment("# a\n\n- b\n\n1. c\n\n> d\n\ne\n\n```f```") {
        assert_eq!(block.block_type(), classify(&block));
    }
}
