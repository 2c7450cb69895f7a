//! HTML markers
//!
//! | Marker    | HTML                                  |
//! |-----------|---------------------------------------|
//! | Insertion | `<ins>`                               |
//! | Deletion  | `<del>`                               |
//! | Comment   | `<span class="critic comment">`       |
//! | Highlight | `<mark>`                              |
//!
//! The page template styles these elements per view, so their names are part of the contract
//! with `templates/page.html`.

use critic_parser::{Marker, MarkerSyntax};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSyntax;

impl MarkerSyntax for HtmlSyntax {
    fn open(&self, marker: Marker) -> &str {
        match marker {
            Marker::Insertion => "<ins>",
            Marker::Deletion => "<del>",
            Marker::Comment => r#"<span class="critic comment">"#,
            Marker::Highlight => "<mark>",
        }
    }

    fn close(&self, marker: Marker) -> &str {
        match marker {
            Marker::Insertion => "</ins>",
            Marker::Deletion => "</del>",
            Marker::Comment => "</span>",
            Marker::Highlight => "</mark>",
        }
    }
}
