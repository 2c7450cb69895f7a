//! Standalone HTML page around a rendered document.
//!
//! The built-in template (`page.html`) styles the HTML markers and adds three buttons that
//! switch a `view-*` class on `<body>`: markup shows everything, original hides insertions and
//! comments, edited hides deletions and comments. It only makes sense for a show-all render.
//!
//! Custom templates are plain files with two placeholders, `{{title}}` and `{{body}}`. The body
//! placeholder is required.

use crate::error::TemplateError;
use std::fs;
use std::path::Path;

const DEFAULT_TEMPLATE: &str = include_str!("page.html");
const TITLE: &str = "{{title}}";
const BODY: &str = "{{body}}";

#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplate {
    head: String,
    tail: String,
    title: String,
}

impl PageTemplate {
    /// The built-in page.
    pub fn new(title: impl Into<String>) -> Self {
        let (head, tail) = DEFAULT_TEMPLATE
            .split_once(BODY)
            .unwrap_or((DEFAULT_TEMPLATE, ""));
        Self {
            head: head.to_string(),
            tail: tail.to_string(),
            title: title.into(),
        }
    }

    pub fn from_source(source: &str, title: impl Into<String>) -> Result<Self, TemplateError> {
        let (head, tail) = source
            .split_once(BODY)
            .ok_or(TemplateError::MissingPlaceholder(BODY))?;
        Ok(Self {
            head: head.to_string(),
            tail: tail.to_string(),
            title: title.into(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>, title: impl Into<String>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(&source, title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Put `body` in the page. The body is inserted verbatim; the title is escaped.
    pub fn wrap(&self, body: &str) -> String {
        let title = escape_html(&self.title);
        let mut page = String::with_capacity(self.head.len() + body.len() + self.tail.len());
        page.push_str(&self.head.replace(TITLE, &title));
        page.push_str(body);
        page.push_str(&self.tail.replace(TITLE, &title));
        page
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
