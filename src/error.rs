//! Error types for eswalk
//!
//! Walking and progress reporting never fail; errors only come from
//! loading input documents and from user-supplied patterns.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading an input file failed.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid JSON.
    #[error("invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON was valid but does not describe an ESTree node.
    #[error("not an ESTree document: {message}")]
    InvalidAst { message: String },

    /// A glob or regex supplied on the command line did not compile.
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

impl Error {
    pub fn invalid_ast(message: impl Into<String>) -> Self {
        Self::InvalidAst {
            message: message.into(),
        }
    }

    /// Attach a file path to an error raised while parsing that file's contents.
    pub(crate) fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Error::InvalidAst { message } => Error::InvalidAst {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        }
    }
}
