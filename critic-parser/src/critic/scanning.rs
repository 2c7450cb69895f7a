//! Scanner
//!
//!     Turns a token stream into segments, in source order, one forward pass.
//!
//! Algorithm
//!
//!     Outside a span every token that does not open one is appended to the current literal run,
//!     so a literal is emitted once per run rather than once per token. An opening delimiter
//!     starts a span, which then swallows tokens until the matching closing delimiter:
//!
//!         - Delimiters of other kinds inside a span are plain content. There is no nesting; the
//!           first matching closer ends the span.
//!         - Inside a substitution the first `~~>` splits original from edited text. Without a
//!           separator the whole body is the original side and the edited side is empty.
//!         - A highlight immediately followed by a `{>>` comment takes that comment as its
//!           trailing comment.
//!
//!     The closer of a span is the first occurrence of its bytes after the opener, wherever the
//!     lexer would have put token boundaries. A delimiter token inside a span that is not the
//!     closer (or the separator) only gives up its first byte as content; the rest is lexed again,
//!     so `{++{++}` is an addition of `{`.
//!
//! Recovery
//!
//!     An opener that never finds its closer turns into literal text, together with everything
//!     after it up to the end of input and the literal run before it. Scanning never fails on
//!     malformed markup; the only errors are I/O errors from the underlying reader. Segments
//!     completed before such an error, and a literal run cut short by it, are still produced,
//!     ahead of the error.
//!
//!     Each segment comes with its byte range in the source. Concatenating the source slices of
//!     all ranges gives back the input byte for byte.

use crate::critic::grammar::SpanKind;
use crate::critic::lexing::{Token, TokenStream};
use crate::critic::segment::{Comment, Segment};
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::ops::Range;

/// A segment with its byte range in the source
pub type Scanned = (Segment, Range<usize>);

/// Lazy, pull based segment producer.
pub struct Scanner<R> {
    tokens: TokenStream<R>,
    ready: VecDeque<Scanned>,
    error: Option<io::Error>,
    failed: bool,
}

/// Outcome of scanning one span, opener included.
enum SpanScan {
    Closed(SpanBody),
    Unterminated(Vec<u8>),
}

/// Bytes between the delimiters, plus the separator position for substitutions.
struct SpanBody {
    text: Vec<u8>,
    separator: Option<Range<usize>>,
}

/// A closed span found after a literal run.
struct OpenedSpan {
    kind: SpanKind,
    start: usize,
    body: SpanBody,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            tokens: TokenStream::new(reader),
            ready: VecDeque::new(),
            error: None,
            failed: false,
        }
    }

    /// Scan up to and including the next span, queueing what was found.
    fn advance(&mut self) -> io::Result<()> {
        let start = self.tokens.position();
        let mut literal = Vec::new();
        let found = self.literal_run(&mut literal);

        // Queued even when the read failed: these bytes are text whatever comes next.
        if !literal.is_empty() {
            let end = start + literal.len();
            self.ready
                .push_back((Segment::Literal { text: literal }, start..end));
        }

        match found? {
            Some(span) => self.finish_span(span),
            None => Ok(()),
        }
    }

    /// Collect literal bytes into `literal` until a span closes or the input ends.
    fn literal_run(&mut self, literal: &mut Vec<u8>) -> io::Result<Option<OpenedSpan>> {
        while let Some(token) = self.tokens.peek()? {
            let Some(kind) = token.opens() else {
                self.tokens.bump(literal)?;
                continue;
            };

            let start = self.tokens.position();
            match self.scan_span(kind)? {
                // Nothing but text until the end of input.
                SpanScan::Unterminated(rest) => literal.extend_from_slice(&rest),
                SpanScan::Closed(body) => return Ok(Some(OpenedSpan { kind, start, body })),
            }
        }
        Ok(None)
    }

    /// Queue a closed span, picking up the comment attached to a highlight.
    fn finish_span(&mut self, span: OpenedSpan) -> io::Result<()> {
        let OpenedSpan { kind, start, body } = span;
        let mut segment = into_segment(kind, body);
        let mut end = self.tokens.position();
        let mut tail = None;
        let mut outcome = Ok(());

        if let Segment::Highlight {
            trailing_comment, ..
        } = &mut segment
        {
            match self.attached_comment() {
                Ok(Some(SpanScan::Closed(comment))) => {
                    *trailing_comment = Some(Comment {
                        content: comment.text,
                    });
                    end = self.tokens.position();
                }
                Ok(Some(SpanScan::Unterminated(rest))) => {
                    tail = Some((Segment::Literal { text: rest }, end..self.tokens.position()));
                }
                Ok(None) => {}
                Err(e) => outcome = Err(e),
            }
        }

        tracing::trace!(?kind, start, end, "scanned span");
        self.ready.push_back((segment, start..end));
        self.ready.extend(tail);
        outcome
    }

    /// Scan the `{>>` comment directly after a highlight, if there is one.
    fn attached_comment(&mut self) -> io::Result<Option<SpanScan>> {
        if self.tokens.peek()? != Some(Token::CommentOpen) {
            return Ok(None);
        }
        self.scan_span(SpanKind::Comment).map(Some)
    }

    /// Consume an opener of `kind` and everything up to its closer.
    fn scan_span(&mut self, kind: SpanKind) -> io::Result<SpanScan> {
        let mut raw = Vec::new();
        self.tokens.bump(&mut raw)?;
        let body_start = raw.len();
        let mut separator = None;

        loop {
            let before = raw.len();
            let Some(token) = self.tokens.peek()? else {
                return Ok(SpanScan::Unterminated(raw));
            };

            if token.closes() == Some(kind) {
                self.tokens.bump(&mut raw)?;
                raw.truncate(before);
                let text = raw.split_off(body_start);
                return Ok(SpanScan::Closed(SpanBody { text, separator }));
            }

            let splits = token == Token::SubstitutionSeparator
                && kind == SpanKind::Substitution
                && separator.is_none();
            if splits {
                self.tokens.bump(&mut raw)?;
                separator = Some(before - body_start..raw.len() - body_start);
            } else if token.is_delimiter() {
                // Its last two bytes may start the closer.
                self.tokens.bump_byte(&mut raw)?;
            } else {
                self.tokens.bump(&mut raw)?;
            }
        }
    }
}

fn into_segment(kind: SpanKind, body: SpanBody) -> Segment {
    let SpanBody { mut text, separator } = body;
    match kind {
        SpanKind::Addition => Segment::Addition { content: text },
        SpanKind::Deletion => Segment::Deletion { content: text },
        SpanKind::Comment => Segment::Comment { content: text },
        SpanKind::Highlight => Segment::Highlight {
            content: text,
            trailing_comment: None,
        },
        SpanKind::Substitution => match separator {
            Some(range) => {
                let edited_text = text.split_off(range.end);
                text.truncate(range.start);
                Segment::Substitution {
                    original_text: text,
                    edited_text,
                }
            }
            None => Segment::Substitution {
                original_text: text,
                edited_text: Vec::new(),
            },
        },
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = io::Result<Scanned>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ready.is_empty() && self.error.is_none() && !self.failed {
            if let Err(e) = self.advance() {
                self.error = Some(e);
            }
        }
        if let Some(scanned) = self.ready.pop_front() {
            return Some(Ok(scanned));
        }
        let error = self.error.take()?;
        self.failed = true;
        Some(Err(error))
    }
}

/// Scan an in-memory document.
///
/// Reading from a string slice cannot fail, so this returns plain segments.
pub fn scan_str(source: &str) -> Vec<Scanned> {
    Scanner::new(source.as_bytes())
        .filter_map(Result::ok)
        .collect()
}
