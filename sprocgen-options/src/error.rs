use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for options parsing (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed options document")]
    #[diagnostic(code(sprocgen::options::xml))]
    Xml {
        filename: String,
        line: u32,
        col: u32,
        #[source]
        source: roxmltree::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(sprocgen::options::invalid))]
    Invalid {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        line: u32,
        col: u32,
        message: String,
    },

    /// A required piece of configuration is absent. Carries no position:
    /// there is no element to point at.
    #[error("{message}")]
    #[diagnostic(code(sprocgen::options::missing))]
    Missing { message: String },
}

impl Error {
    /// The 1-based line/column of the offending input, when the failure is
    /// traceable to a position in the options document.
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            Error::Xml { line, col, .. } | Error::Invalid { line, col, .. } => Some((*line, *col)),
            Error::Io { .. } | Error::Missing { .. } => None,
        }
    }

    pub(crate) fn missing(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Missing {
            message: message.into(),
        })
    }
}
