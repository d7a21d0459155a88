use thiserror::Error;

use crate::inline::SpanKind;

/// Result alias used throughout the crate.
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

/// Error categories, for callers that only care about the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed element tree at serialization time.
    Structure,
    /// An inline span that cannot be turned into an element.
    UnsupportedSpan,
    /// No `# ` title line in the document.
    MissingTitle,
}

/// Ways a parent element can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("parent requires a tag")]
    MissingTag,
    #[error("parent requires children")]
    MissingChildren,
}

/// Every failure the conversion pipeline can report.
///
/// Conversion is fail-fast: the first error aborts the current document and
/// no partially built tree or markup is returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("unsupported {kind:?} span: {reason}")]
    UnsupportedSpan { kind: SpanKind, reason: &'static str },

    #[error("document has no `# ` title line")]
    MissingTitle,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Structure(_) => ErrorKind::Structure,
            ConvertError::UnsupportedSpan { .. } => ErrorKind::UnsupportedSpan,
            ConvertError::MissingTitle => ErrorKind::MissingTitle,
        }
    }

    pub(crate) fn unsupported_span(kind: SpanKind, reason: &'static str) -> Self {
        ConvertError::UnsupportedSpan { kind, reason }
    }
}
