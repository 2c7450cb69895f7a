//! Span grammar
//!
//!     The five annotation kinds and the delimiter pairs that enclose them:
//!
//!         {++ added ++}
//!         {-- deleted --}
//!         {~~ original ~~> edited ~~}
//!         {>> comment <<}
//!         {== highlighted ==}{>> optional attached comment <<}
//!
//!     Every delimiter is exactly three characters long and none of them contains a line break.
//!     The lexer relies on the latter to tokenize one line at a time.

use serde::Serialize;

/// Separates the original side from the edited side inside a substitution.
pub const SUBSTITUTION_SEPARATOR: &str = "~~>";

/// The kind of an annotation span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Addition,
    Deletion,
    Substitution,
    Comment,
    Highlight,
}

impl SpanKind {
    pub const ALL: [SpanKind; 5] = [
        SpanKind::Addition,
        SpanKind::Deletion,
        SpanKind::Substitution,
        SpanKind::Comment,
        SpanKind::Highlight,
    ];

    pub fn opening(self) -> &'static str {
        match self {
            SpanKind::Addition => "{++",
            SpanKind::Deletion => "{--",
            SpanKind::Substitution => "{~~",
            SpanKind::Comment => "{>>",
            SpanKind::Highlight => "{==",
        }
    }

    pub fn closing(self) -> &'static str {
        match self {
            SpanKind::Addition => "++}",
            SpanKind::Deletion => "--}",
            SpanKind::Substitution => "~~}",
            SpanKind::Comment => "<<}",
            SpanKind::Highlight => "==}",
        }
    }
}
