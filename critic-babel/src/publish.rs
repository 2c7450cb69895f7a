//! Publishing a rendered document: optional markdown pass, then optional page wrapper.

use crate::markdown::{self, MarkdownOptions};
use crate::templates::PageTemplate;

#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Convert the rendered text from markdown to HTML first
    pub markdown: Option<MarkdownOptions>,
    /// Wrap the result in a standalone page
    pub template: Option<PageTemplate>,
}

impl PublishOptions {
    pub fn with_markdown(mut self, options: MarkdownOptions) -> Self {
        self.markdown = Some(options);
        self
    }

    pub fn with_template(mut self, template: PageTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Whether publishing changes the rendered text at all
    pub fn is_passthrough(&self) -> bool {
        self.markdown.is_none() && self.template.is_none()
    }
}

/// Apply the configured passes to a rendered document.
///
/// Nothing here can fail. A bad template is rejected when the [PageTemplate] is built.
pub fn publish(rendered: &str, options: &PublishOptions) -> String {
    let body = match &options.markdown {
        Some(markdown_options) => markdown::to_html(rendered, markdown_options),
        None => rendered.to_string(),
    };
    match &options.template {
        Some(template) => template.wrap(&body),
        None => body,
    }
}
