//! Markdown to HTML pass
//!
//!     Rendered documents are usually markdown with inline markers. We use the comrak crate for the
//!     conversion: it is CommonMark compliant and ships the GFM extensions people expect in
//!     prose (tables, strikethrough, autolinks, task lists).
//!
//!     Raw HTML rendering is always on. Without it comrak would replace the `<ins>`/`<del>` markers
//!     with comments and the annotations would vanish from the page.

use comrak::{markdown_to_html, Options};

/// Which CommonMark extensions to enable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub table: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            table: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

impl MarkdownOptions {
    fn to_comrak(self) -> Options<'static> {
        let mut options = Options::default();
        options.extension.table = self.table;
        options.extension.strikethrough = self.strikethrough;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.render.unsafe_ = true;
        options
    }
}

/// Convert a markdown document to an HTML fragment.
pub fn to_html(source: &str, options: &MarkdownOptions) -> String {
    let html = markdown_to_html(source, &options.to_comrak());
    tracing::debug!(input = source.len(), output = html.len(), "markdown pass");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_inline_markers() {
        let html = to_html(
            "The <del>quick</del><ins>lazy</ins> fox.",
            &MarkdownOptions::default(),
        );
        assert_eq!(
            html,
            "<p>The <del>quick</del><ins>lazy</ins> fox.</p>\n"
        );
    }

    #[test]
    fn converts_headings_and_emphasis() {
        let html = to_html("# Title\n\nsome *text*\n", &MarkdownOptions::default());
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn strikethrough_extension_can_be_disabled() {
        let on = to_html("~~gone~~", &MarkdownOptions::default());
        assert!(on.contains("<del>gone</del>"));

        let off = to_html(
            "~~gone~~",
            &MarkdownOptions {
                strikethrough: false,
                ..MarkdownOptions::default()
            },
        );
        assert!(!off.contains("<del>"));
    }
}
