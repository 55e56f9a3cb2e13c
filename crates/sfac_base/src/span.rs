//! Source location tracking for error reporting.
//!
//! A [`Span`] is a contiguous byte-offset range within a source string; every
//! token, AST node, symbol, and diagnostic carries one. A [`LineIndex`]
//! resolves a raw byte offset into the line/column/offset triple that makes
//! up a human-facing [`SourceLocation`].

use std::fmt;

/// A byte-offset range in source text.
///
/// Spans are `Copy` and cheap to pass around. Use [`Span::merge`] to combine
/// spans when building compound expressions (e.g. a binary expression's span
/// is the merge of its operands' spans).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// Byte offset of the first character (inclusive).
    pub start: usize,
    /// Byte offset past the last character (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a span from byte offsets. No validation is performed;
    /// `start` may exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a span covering from the start of `self` to the end of `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if this span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `self` is wholly contained within `parent`.
    ///
    /// Used to check the AST invariant that every node's span lies within
    /// its parent's span.
    pub fn contained_in(&self, parent: Span) -> bool {
        self.start >= parent.start && self.end <= parent.end
    }
}

/// A resolved human-facing position: 1-based line, 1-based column, and the
/// 0-based byte offset it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

/// A resolved source location: a start/end [`Position`] pair plus an
/// optional file name.
///
/// This is the location type diagnostics and AST introspection surfaces use;
/// [`Span`] is the raw byte-offset form used internally during lexing,
/// parsing, and tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub file: Option<String>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.start.line, self.start.column)
        } else {
            write!(f, "{}:{}", self.start.line, self.start.column)
        }
    }
}

/// Resolves byte offsets into line/column positions for a single source text.
///
/// Built once per source string (the newline offsets are scanned up front),
/// then reused for every [`Span`] that needs to become a [`SourceLocation`].
pub struct LineIndex {
    /// Byte offset of the start of each line; `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    source_len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts, source_len: source.len() }
    }

    /// Resolves a byte offset to a 1-based line/column [`Position`].
    ///
    /// Offsets past the end of the source clamp to the last known position.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source_len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insertion) => insertion - 1,
        };
        let line_start = self.line_starts[line_idx];
        Position {
            line: (line_idx + 1) as u32,
            column: (offset - line_start + 1) as u32,
            offset,
        }
    }

    /// Resolves a [`Span`] into a full [`SourceLocation`], optionally
    /// attaching a file name.
    pub fn resolve(&self, span: Span, file: Option<&str>) -> SourceLocation {
        SourceLocation {
            start: self.position(span.start),
            end: self.position(span.end),
            file: file.map(|s| s.to_string()),
        }
    }
}
