//! Inline lexer: one run of markdown text to typed text spans.
//!
//! Lexing is a fixed sequence of passes, each rewriting only the spans
//! still marked [`SpanKind::Plain`] and passing everything else through:
//!
//! 1. images `![alt](target)`
//! 2. links `[text](target)` not preceded by `!`
//! 3. bold `**text**`
//! 4. italic `_text_`
//! 5. code `` `text` ``
//!
//! Each delimiter pass is a single left-to-right scan for
//! `<delim><no delim char><delim>`; there is no nesting and no recursion.
//! An unmatched delimiter stays in the surrounding plain text.
//!
//! Spans borrow from the input; the scanners use `memchr` and never allocate
//! beyond the output vectors.

use memchr::{memchr, memmem};

use crate::element::{Element, Leaf};
use crate::error::{ConvertError, Result};

/// Kinds of inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::Plain => "plain",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }
}

/// A typed fragment of inline text.
///
/// `text` is the visible text with delimiters removed (the anchor text for
/// links, the alt text for images). `target` is the URL and is only set for
/// links and images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    pub target: Option<&'a str>,
}

impl<'a> TextSpan<'a> {
    #[inline]
    pub const fn new(kind: SpanKind, text: &'a str) -> Self {
        Self {
            kind,
            text,
            target: None,
        }
    }

    #[inline]
    pub const fn plain(text: &'a str) -> Self {
        Self::new(SpanKind::Plain, text)
    }

    #[inline]
    pub const fn link(text: &'a str, target: &'a str) -> Self {
        Self {
            kind: SpanKind::Link,
            text,
            target: Some(target),
        }
    }

    #[inline]
    pub const fn image(alt: &'a str, target: &'a str) -> Self {
        Self {
            kind: SpanKind::Image,
            text: alt,
            target: Some(target),
        }
    }
}

/// Lex `text` into spans using the full pass order.
pub fn split_spans(text: &str) -> Vec<TextSpan<'_>> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_images(spans);
    let spans = split_links(spans);
    let spans = split_delimiter(spans, "**", SpanKind::Bold);
    let spans = split_delimiter(spans, "_", SpanKind::Italic);
    split_delimiter(spans, "`", SpanKind::Code)
}

/// Lex `text` and map every span to a leaf element.
pub fn text_to_elements(text: &str) -> Result<Vec<Element>> {
    split_spans(text).iter().map(span_to_element).collect()
}

/// Extract `![alt](target)` from plain spans.
pub fn split_images(spans: Vec<TextSpan<'_>>) -> Vec<TextSpan<'_>> {
    split_plain(spans, |text, from| find_bracketed(text, from, true))
}

/// Extract `[text](target)` from plain spans, skipping any `[` preceded by `!`.
pub fn split_links(spans: Vec<TextSpan<'_>>) -> Vec<TextSpan<'_>> {
    split_plain(spans, |text, from| find_bracketed(text, from, false))
}

/// Extract `<delimiter>text<delimiter>` runs from plain spans as `kind`.
///
/// The enclosed text may not contain the delimiter's first byte, so `**`
/// never matches across a single `*`. Delimiters are expected to be ASCII.
pub fn split_delimiter<'a>(
    spans: Vec<TextSpan<'a>>,
    delimiter: &str,
    kind: SpanKind,
) -> Vec<TextSpan<'a>> {
    if delimiter.is_empty() {
        return spans;
    }
    split_plain(spans, |text, from| find_delimited(text, from, delimiter, kind))
}

/// Map a span to its HTML leaf.
///
/// | kind   | tag    | value | attributes      |
/// |--------|--------|-------|-----------------|
/// | Plain  | none   | text  |                 |
/// | Bold   | `b`    | text  |                 |
/// | Italic | `i`    | text  |                 |
/// | Code   | `code` | text  |                 |
/// | Link   | `a`    | text  | `href`          |
/// | Image  | `img`  | none  | `src`, `alt`    |
///
/// Link and image spans without a target are rejected.
pub fn span_to_element(span: &TextSpan<'_>) -> Result<Element> {
    let element = match span.kind {
        SpanKind::Plain => Element::text(span.text),
        SpanKind::Bold => Element::leaf("b", span.text),
        SpanKind::Italic => Element::leaf("i", span.text),
        SpanKind::Code => Element::leaf("code", span.text),
        SpanKind::Link => {
            let href = span
                .target
                .ok_or_else(|| ConvertError::unsupported_span(span.kind, "missing target"))?;
            Leaf::new(Some("a"), Some(span.text))
                .with_attribute("href", href)
                .into()
        }
        SpanKind::Image => {
            let src = span
                .target
                .ok_or_else(|| ConvertError::unsupported_span(span.kind, "missing target"))?;
            Leaf::new(Some("img"), None)
                .with_attribute("src", src)
                .with_attribute("alt", span.text)
                .into()
        }
    };
    Ok(element)
}

/// A match found by one of the scanners: `start..end` in the plain text,
/// and the span that replaces it.
struct Found<'a> {
    start: usize,
    end: usize,
    span: TextSpan<'a>,
}

/// Run `find` repeatedly over each plain span, interleaving matches with the
/// non-empty text around them. Plain spans without a match pass through
/// untouched, including empty ones.
fn split_plain<'a, F>(spans: Vec<TextSpan<'a>>, mut find: F) -> Vec<TextSpan<'a>>
where
    F: FnMut(&'a str, usize) -> Option<Found<'a>>,
{
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }

        let text = span.text;
        let mut last = 0;
        let mut matched = false;

        while let Some(found) = find(text, last) {
            matched = true;
            if found.start > last {
                out.push(TextSpan::plain(&text[last..found.start]));
            }
            out.push(found.span);
            last = found.end;
        }

        if !matched {
            out.push(span);
        } else if last < text.len() {
            out.push(TextSpan::plain(&text[last..]));
        }
    }

    out
}

fn find_delimited<'a>(
    text: &'a str,
    from: usize,
    delimiter: &str,
    kind: SpanKind,
) -> Option<Found<'a>> {
    let bytes = text.as_bytes();
    let delim = delimiter.as_bytes();
    let stop = delim[0];
    let mut search = from;

    while let Some(offset) = memmem::find(&bytes[search..], delim) {
        let start = search + offset;
        let content_start = start + delim.len();

        // The content runs to the first stop byte. If there is none, no
        // later candidate can close either.
        let close = content_start + memchr(stop, &bytes[content_start..])?;
        if bytes[close..].starts_with(delim) {
            return Some(Found {
                start,
                end: close + delim.len(),
                span: TextSpan::new(kind, &text[content_start..close]),
            });
        }

        search = start + 1;
    }

    None
}

fn find_bracketed(text: &str, from: usize, image: bool) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let mut search = from;

    loop {
        let open = if image {
            search + memmem::find(&bytes[search..], b"![")?
        } else {
            search + memchr(b'[', &bytes[search..])?
        };

        if !image && open > 0 && bytes[open - 1] == b'!' {
            search = open + 1;
            continue;
        }

        let label_start = open + if image { 2 } else { 1 };
        let label_end = label_start + memchr(b']', &bytes[label_start..])?;

        if bytes.get(label_end + 1) == Some(&b'(') {
            let target_start = label_end + 2;
            let target_end = target_start + memchr(b')', &bytes[target_start..])?;
            let label = &text[label_start..label_end];
            let target = &text[target_start..target_end];
            let span = if image {
                TextSpan::image(label, target)
            } else {
                TextSpan::link(label, target)
            };
            return Some(Found {
                start: open,
                end: target_end + 1,
                span,
            });
        }

        search = open + 1;
    }
}
