//! # mdsite core
//!
//! Converts markdown text into a tree of HTML elements and serializes it.
//!
//! The pipeline is: [`lexer::segment`] splits the document into blank-line
//! separated blocks, [`lexer::classify`] types each block, the
//! [`Parser`] builds block elements, and [`inline::split_spans`] lexes the
//! inline text inside them. [`Element::to_html`] then renders the tree.
//!
//! ## Quick Start
//!
//! ```rust
//! let root = mdsite_core::convert("## Hello, **world**").unwrap();
//! let html = mdsite_core::render(&root).unwrap();
//! assert_eq!(html, "<div><h2>Hello, <b>world</b></h2></div>");
//!
//! let title = mdsite_core::extract_title("# Title\nbody").unwrap();
//! assert_eq!(title, "Title");
//! ```
//!
//! Conversion is synchronous and keeps no state between calls, so documents
//! may be converted in parallel without coordination.
//!
//! The supported syntax is deliberately small: ATX headings, fenced code
//! without backticks inside, `>` quotes, `- ` and `1. ` lists, paragraphs,
//! and single-level `**bold**`, `_italic_`, `` `code` ``, links and images.
//! Nested emphasis is not resolved and nothing is HTML-escaped.

pub mod element;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod span;

pub use element::{Attributes, Element, Leaf, Parent};
pub use error::{ConvertError, ErrorKind, Result, StructureError};
pub use inline::{SpanKind, TextSpan};
pub use lexer::{Block, BlockType};
pub use parser::{extract_title, Parser};

/// Convert a markdown document to its root `div` element.
pub fn convert(markdown: &str) -> Result<Element> {
    Parser::new().parse(markdown)
}

/// Serialize an element tree to HTML.
pub fn render(element: &Element) -> Result<String> {
    element.to_html()
}

/// Convert and serialize in one step.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    render(&convert(markdown)?)
}
