//! Segments
//!
//!     The scanner turns source text into an ordered sequence of segments: literal runs and the
//!     five annotation kinds. Segments own their text; the delimiters are implied by the variant.
//!
//!     Reconstructing the two readings of a document only needs the variant:
//!
//!         original = Literal + Deletion + Substitution.original_text + Highlight
//!         edited   = Literal + Addition + Substitution.edited_text   + Highlight
//!
//!     Comments belong to neither reading.
//!
//!     Segment text is raw bytes. The input does not have to be UTF-8, and whatever came in goes
//!     back out unchanged. Only the JSON form decodes it, replacing invalid sequences.

use crate::critic::grammar::{SpanKind, SUBSTITUTION_SEPARATOR};
use serde::{Serialize, Serializer};

/// A comment attached to the highlight right before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    #[serde(serialize_with = "lossy")]
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Literal {
        #[serde(serialize_with = "lossy")]
        text: Vec<u8>,
    },
    Addition {
        #[serde(serialize_with = "lossy")]
        content: Vec<u8>,
    },
    Deletion {
        #[serde(serialize_with = "lossy")]
        content: Vec<u8>,
    },
    Substitution {
        #[serde(serialize_with = "lossy")]
        original_text: Vec<u8>,
        #[serde(serialize_with = "lossy")]
        edited_text: Vec<u8>,
    },
    Comment {
        #[serde(serialize_with = "lossy")]
        content: Vec<u8>,
    },
    Highlight {
        #[serde(serialize_with = "lossy")]
        content: Vec<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trailing_comment: Option<Comment>,
    },
}

fn lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

impl Segment {
    pub fn literal(text: impl Into<Vec<u8>>) -> Self {
        Segment::Literal { text: text.into() }
    }

    /// The annotation kind, `None` for literal text
    pub fn kind(&self) -> Option<SpanKind> {
        match self {
            Segment::Literal { .. } => None,
            Segment::Addition { .. } => Some(SpanKind::Addition),
            Segment::Deletion { .. } => Some(SpanKind::Deletion),
            Segment::Substitution { .. } => Some(SpanKind::Substitution),
            Segment::Comment { .. } => Some(SpanKind::Comment),
            Segment::Highlight { .. } => Some(SpanKind::Highlight),
        }
    }

    /// Text this segment contributes to the document before the edits.
    pub fn original(&self) -> &[u8] {
        match self {
            Segment::Literal { text } => text,
            Segment::Deletion { content } | Segment::Highlight { content, .. } => content,
            Segment::Substitution { original_text, .. } => original_text,
            Segment::Addition { .. } | Segment::Comment { .. } => &[],
        }
    }

    /// Text this segment contributes to the document after the edits.
    pub fn edited(&self) -> &[u8] {
        match self {
            Segment::Literal { text } => text,
            Segment::Addition { content } | Segment::Highlight { content, .. } => content,
            Segment::Substitution { edited_text, .. } => edited_text,
            Segment::Deletion { .. } | Segment::Comment { .. } => &[],
        }
    }

    /// Write the segment back out as markup.
    ///
    /// A substitution scanned without a separator comes back with one (and an empty edited
    /// side); every other scanned segment reproduces its source exactly.
    pub fn source(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Segment::Literal { text } => out.extend_from_slice(text),
            Segment::Addition { content }
            | Segment::Deletion { content }
            | Segment::Comment { content } => {
                if let Some(kind) = self.kind() {
                    push_span(&mut out, kind, content);
                }
            }
            Segment::Substitution {
                original_text,
                edited_text,
            } => {
                out.extend_from_slice(SpanKind::Substitution.opening().as_bytes());
                out.extend_from_slice(original_text);
                out.extend_from_slice(SUBSTITUTION_SEPARATOR.as_bytes());
                out.extend_from_slice(edited_text);
                out.extend_from_slice(SpanKind::Substitution.closing().as_bytes());
            }
            Segment::Highlight {
                content,
                trailing_comment,
            } => {
                push_span(&mut out, SpanKind::Highlight, content);
                if let Some(comment) = trailing_comment {
                    push_span(&mut out, SpanKind::Comment, &comment.content);
                }
            }
        }
        out
    }
}

fn push_span(out: &mut Vec<u8>, kind: SpanKind, content: &[u8]) {
    out.extend_from_slice(kind.opening().as_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(kind.closing().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_and_edited_sides() {
        let sub = Segment::Substitution {
            original_text: "teh".into(),
            edited_text: "the".into(),
        };
        assert_eq!(sub.original(), b"teh");
        assert_eq!(sub.edited(), b"the");

        let comment = Segment::Comment {
            content: "note".into(),
        };
        assert!(comment.original().is_empty());
        assert!(comment.edited().is_empty());
    }

    #[test]
    fn highlight_source_includes_attached_comment() {
        let highlight = Segment::Highlight {
            content: "important".into(),
            trailing_comment: Some(Comment {
                content: "check this".into(),
            }),
        };
        assert_eq!(highlight.source(), b"{==important==}{>>check this<<}");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Segment::Addition {
            content: "lazy".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "addition");
        assert_eq!(json["content"], "lazy");
    }

    #[test]
    fn json_replaces_invalid_bytes() {
        let json = serde_json::to_value(Segment::literal(&b"caf\xe9"[..])).unwrap();
        assert_eq!(json["text"], "caf\u{fffd}");
    }
}
