//! Lexer
//!
//!     Tokenization is done by a vanilla logos lexer. There is one token per delimiter, one for the
//!     substitution separator, a `Text` token for runs of characters that can never begin a
//!     delimiter and a one character `Symbol` token for delimiter characters that did not end up
//!     forming one (a lone `{`, a `+` inside prose, and so on). Logos picks the longest match, which
//!     is what resolves `{++` against a plain `{`.
//!
//! Streaming
//!
//!     No delimiter contains a line break, so a delimiter can never straddle two lines. The
//!     [TokenStream] takes advantage of that: it reads the input one line at a time and lexes one
//!     token at a time from the current line, so memory is bounded by the longest line rather than
//!     by the document.
//!
//!     The input is bytes, not text. Bytes the patterns cannot match (anything that is not UTF-8)
//!     come out one at a time as `Text`, so a Latin-1 document flows through untouched.
//!
//!     Lexing on demand also lets the scanner step into a delimiter token. Inside a span the tail
//!     of `{++` may be the start of `++}`; [TokenStream::bump_byte] consumes only the first byte
//!     and lexes the rest again.

use crate::critic::grammar::SpanKind;
use logos::Logos;
use std::io::{self, BufRead};
use std::ops::Range;

/// All possible tokens in CriticMarkup text
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(source = [u8])]
pub enum Token {
    #[token("{++")]
    AdditionOpen,
    #[token("++}")]
    AdditionClose,

    #[token("{--")]
    DeletionOpen,
    #[token("--}")]
    DeletionClose,

    #[token("{~~")]
    SubstitutionOpen,
    #[token("~~>")]
    SubstitutionSeparator,
    #[token("~~}")]
    SubstitutionClose,

    #[token("{>>")]
    CommentOpen,
    #[token("<<}")]
    CommentClose,

    #[token("{==")]
    HighlightOpen,
    #[token("==}")]
    HighlightClose,

    // A delimiter character that is not part of a delimiter
    #[regex(r"[{}+\-~<>=]")]
    Symbol,

    // Everything else, newlines included
    #[regex(r"[^{}+\-~<>=]+")]
    Text,
}

impl Token {
    /// The span kind this token opens, if it is an opening delimiter
    pub fn opens(self) -> Option<SpanKind> {
        match self {
            Token::AdditionOpen => Some(SpanKind::Addition),
            Token::DeletionOpen => Some(SpanKind::Deletion),
            Token::SubstitutionOpen => Some(SpanKind::Substitution),
            Token::CommentOpen => Some(SpanKind::Comment),
            Token::HighlightOpen => Some(SpanKind::Highlight),
            _ => None,
        }
    }

    /// The span kind this token closes, if it is a closing delimiter
    pub fn closes(self) -> Option<SpanKind> {
        match self {
            Token::AdditionClose => Some(SpanKind::Addition),
            Token::DeletionClose => Some(SpanKind::Deletion),
            Token::SubstitutionClose => Some(SpanKind::Substitution),
            Token::CommentClose => Some(SpanKind::Comment),
            Token::HighlightClose => Some(SpanKind::Highlight),
            _ => None,
        }
    }

    /// Whether this is one of the three byte delimiters
    pub fn is_delimiter(self) -> bool {
        !matches!(self, Token::Symbol | Token::Text)
    }
}

/// Lex the token at the start of `source`, with its length in bytes.
fn next_token(source: &[u8]) -> Option<(Token, usize)> {
    let mut lexer = Token::lexer(source);
    match lexer.next()? {
        Ok(token) => Some((token, lexer.span().len())),
        // Not UTF-8. Keep the byte as text and lex on from the next one.
        Err(_) => Some((Token::Text, 1)),
    }
}

/// Tokenize a chunk of source, keeping the byte range of every token.
pub fn tokenize(source: &[u8]) -> Vec<(Token, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while let Some((token, len)) = next_token(&source[cursor..]) {
        tokens.push((token, cursor..cursor + len));
        cursor += len;
    }
    tokens
}

/// Pull based token source over a buffered reader.
pub struct TokenStream<R> {
    reader: R,
    line: Vec<u8>,
    cursor: usize,
    peeked: Option<(Token, usize)>,
    consumed: usize,
    exhausted: bool,
    deferred: Option<io::Error>,
}

impl<R: BufRead> TokenStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            cursor: 0,
            peeked: None,
            consumed: 0,
            exhausted: false,
            deferred: None,
        }
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Look at the next token without consuming it. `None` means end of input.
    pub fn peek(&mut self) -> io::Result<Option<Token>> {
        Ok(self.fill()?.map(|(token, _)| token))
    }

    /// Consume the next token, appending its source bytes to `buf`.
    pub fn bump(&mut self, buf: &mut Vec<u8>) -> io::Result<Option<Token>> {
        let Some((token, len)) = self.fill()? else {
            return Ok(None);
        };
        self.take(len, buf);
        Ok(Some(token))
    }

    /// Consume only the first byte of the next token. The remainder is lexed again on the next
    /// peek. Returns false at end of input.
    pub fn bump_byte(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        if self.fill()?.is_none() {
            return Ok(false);
        }
        self.take(1, buf);
        Ok(true)
    }

    fn take(&mut self, len: usize, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.line[self.cursor..self.cursor + len]);
        self.cursor += len;
        self.consumed += len;
        self.peeked = None;
    }

    /// Lex the token under the cursor, reading the next line when the current one is used up.
    fn fill(&mut self) -> io::Result<Option<(Token, usize)>> {
        if self.peeked.is_some() {
            return Ok(self.peeked);
        }
        while self.cursor == self.line.len() {
            if let Some(e) = self.deferred.take() {
                return Err(e);
            }
            if self.exhausted {
                return Ok(None);
            }
            self.line.clear();
            self.cursor = 0;
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => {}
                // Bytes read before the failure go out first.
                Err(e) if !self.line.is_empty() => self.deferred = Some(e),
                Err(e) => return Err(e),
            }
        }
        let next = next_token(&self.line[self.cursor..]);
        self.peeked = next;
        Ok(next)
    }
}
