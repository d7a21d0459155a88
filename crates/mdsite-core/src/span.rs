//! Byte ranges locating blocks in the source document.
//!
//! Blocks keep a `Span` into the (newline-normalized) source so that tools
//! like `mdsite inspect` can point back at the text a block came from.

/// A byte range in the source text, `[start, end)`.
///
/// # Example
///
/// ```rust
/// use mdsite_core::span::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert_eq!(span.slice("abc\n## Hi\n"), "## Hi\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Build a span from `usize` offsets as produced by slice arithmetic.
    ///
    /// Offsets past `u32::MAX` saturate, so spans of documents larger than
    /// 4 GiB are clamped to the end of the addressable range.
    #[inline]
    pub fn from_range(start: usize, end: usize) -> Self {
        Self::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(end).unwrap_or(u32::MAX),
        )
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Return the text this span covers in `source`.
    ///
    /// Panics if the span does not lie on char boundaries of `source`;
    /// spans produced by the segmenter always do.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }
}
