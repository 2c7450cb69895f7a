//! Output formats for rendered CriticMarkup documents
//!
//!     critic-parser renders documents with abstract markers. This crate holds everything that turns
//!     that output into something a browser shows:
//!
//!     - html:      binds the markers to HTML elements (`<ins>`, `<del>`, `<mark>`, comment spans)
//!     - markdown:  runs the rendered text through a CommonMark to HTML converter
//!     - templates: wraps a rendered body in a standalone page that can switch between the markup,
//!                  original and edited readings client side
//!     - publish:   chains the optional markdown pass and the optional page wrapper
//!
//!     This is a pure lib. It powers the critic CLI but does no printing, reads no environment and
//!     only touches the filesystem when asked to load a template file.
//!
//! Implementation Principles
//!
//!     As with the rest of the toolchain, conversion is offloaded to specialized crates. We never
//!     write a markdown renderer; rendered text is handed to comrak as is. The HTML markers are
//!     plain inline HTML, which CommonMark passes through untouched as long as raw HTML rendering
//!     is enabled.

pub mod error;
pub mod html;
pub mod markdown;
pub mod publish;
pub mod templates;

pub use error::TemplateError;
pub use html::HtmlSyntax;
pub use markdown::MarkdownOptions;
pub use publish::{publish, PublishOptions};
pub use templates::PageTemplate;
