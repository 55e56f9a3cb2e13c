//! Span-to-location bridging.
//!
//! The analyzer only ever sees an already-built [`sfac_ast::Program`] — no
//! source text (`spec.md` §6's "Upstream (from Parser)" contract) — so a
//! [`sfac_base::LineIndex`] is unavailable here to resolve line/column.
//! Diagnostics therefore carry an offset-only [`SourceLocation`]; a caller
//! holding the original text can re-resolve line/column with `LineIndex`
//! before display. Presentation formatting itself is out of scope (`spec.md`
//! §1 Non-goals).

use sfac_base::{Position, SourceLocation, Span};

pub fn span_to_location(span: Span) -> SourceLocation {
    SourceLocation {
        start: Position { line: 0, column: 0, offset: span.start },
        end: Position { line: 0, column: 0, offset: span.end },
        file: None,
    }
}
