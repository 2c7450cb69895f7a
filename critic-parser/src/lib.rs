//! # critic
//!
//! A scanner and view renderer for CriticMarkup annotated text.
//!
//! File Layout
//!
//! The work is split the same way the data flows, leaf first:
//! src/critic
//!   ├── grammar      The five span kinds and their delimiters
//!   ├── lexing       logos tokens and the line-at-a-time token stream
//!   ├── segment      The Segment data model produced by scanning
//!   ├── scanning     Token stream -> Segment sequence
//!   ├── rendering    Segment + RenderPolicy -> output fragment
//!   └── pipeline     Reader -> Scanner -> Renderer -> Writer
//!
//! The library never prints and never touches the environment. Binding the abstract markers to
//! HTML, converting markdown, and wrapping pages are the job of critic-babel.

pub mod critic;

pub use critic::pipeline::{process, process_with, render_str, ProcessError};
pub use critic::rendering::{
    render, BracketSyntax, Marker, MarkerSyntax, Mode, RenderPolicy, Renderer, View,
};
pub use critic::scanning::{scan_str, Scanner};
pub use critic::segment::{Comment, Segment};
