//! Error types for output conversion

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading a page template
#[derive(Debug)]
pub enum TemplateError {
    /// The template file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The template has no place to put the rendered document
    MissingPlaceholder(&'static str),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Io { path, source } => {
                write!(f, "cannot read template {}: {}", path.display(), source)
            }
            TemplateError::MissingPlaceholder(placeholder) => {
                write!(f, "template is missing the {} placeholder", placeholder)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Io { source, .. } => Some(source),
            TemplateError::MissingPlaceholder(_) => None,
        }
    }
}
