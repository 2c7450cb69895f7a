//! Processing pipeline
//!
//!     Reader -> [Scanner] -> [Renderer] -> Writer.
//!
//!     Segments are rendered and written as soon as the scanner produces them, so nothing but the
//!     span being scanned is held in memory. Input bytes need not be UTF-8; they are copied to
//!     the output as they are. Only I/O can fail, and the error says which side failed. Output
//!     written before a failure stays written, including text read just before a read error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use critic_parser::{process, Mode, RenderPolicy, View};
//!
//! let policy = RenderPolicy::new(View::EditedOnly, Mode::Raw);
//! let mut out = Vec::new();
//! let written = process(&mut out, "The {--quick--}{++lazy++} fox.".as_bytes(), &policy)?;
//! ```

use crate::critic::rendering::{BracketSyntax, MarkerSyntax, RenderPolicy, Renderer};
use crate::critic::scanning::Scanner;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Errors that can occur while processing a document
#[derive(Debug)]
pub enum ProcessError {
    /// The input could not be read
    Read(io::Error),
    /// The output could not be written
    Write(io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Read(e) => write!(f, "failed to read input: {}", e),
            ProcessError::Write(e) => write!(f, "failed to write output: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Read(e) | ProcessError::Write(e) => Some(e),
        }
    }
}

/// Render `input` to `output` with bracket markers. Returns the number of bytes written.
pub fn process<W, R>(output: &mut W, input: R, policy: &RenderPolicy) -> Result<usize, ProcessError>
where
    W: Write + ?Sized,
    R: BufRead,
{
    process_with(output, input, policy, &BracketSyntax)
}

/// Render `input` to `output` using the given marker syntax. Returns the number of bytes written.
pub fn process_with<W, R>(
    output: &mut W,
    input: R,
    policy: &RenderPolicy,
    syntax: &dyn MarkerSyntax,
) -> Result<usize, ProcessError>
where
    W: Write + ?Sized,
    R: BufRead,
{
    warn_if_ill_defined(policy);
    let renderer = Renderer::new(*policy, syntax);
    let mut fragment = Vec::new();
    let mut written = 0;
    let mut segments = 0;

    for scanned in Scanner::new(input) {
        let (segment, _) = scanned.map_err(ProcessError::Read)?;
        fragment.clear();
        renderer.render(&segment, &mut fragment);
        output
            .write_all(&fragment)
            .map_err(ProcessError::Write)?;
        written += fragment.len();
        segments += 1;
    }
    output.flush().map_err(ProcessError::Write)?;

    tracing::debug!(segments, bytes = written, ?policy, "rendered document");
    Ok(written)
}

/// Render an in-memory document to a string.
pub fn render_str(source: &str, policy: &RenderPolicy, syntax: &dyn MarkerSyntax) -> String {
    warn_if_ill_defined(policy);
    let renderer = Renderer::new(*policy, syntax);
    let mut out = Vec::with_capacity(source.len());
    // Reading from a string slice cannot fail.
    for (segment, _) in Scanner::new(source.as_bytes()).filter_map(Result::ok) {
        renderer.render(&segment, &mut out);
    }
    // Segments only split at ASCII delimiters, so UTF-8 in gives UTF-8 out.
    String::from_utf8_lossy(&out).into_owned()
}

fn warn_if_ill_defined(policy: &RenderPolicy) {
    if policy.is_ill_defined() {
        tracing::warn!(
            "show-all view in raw mode concatenates original and edited text without markers"
        );
    }
}
