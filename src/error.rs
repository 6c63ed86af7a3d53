//! Defines the `Error` and `Result` types used by this crate.

use std::str::Utf8Error;
use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error returned by all fallible operations within this crate.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// Represents a generic error message.
    #[error("{0}")]
    Message(String),

    /// The input is not syntactically valid HCL.
    #[error("failed to parse `{origin}`: {source}")]
    Parse {
        /// The file that failed to parse.
        origin: String,
        /// The underlying error.
        source: hcl::Error,
    },

    /// The input is not valid UTF-8.
    #[error("`{origin}` is not valid UTF-8: {source}")]
    Encoding {
        /// The file with the invalid encoding.
        origin: String,
        /// The underlying error.
        source: Utf8Error,
    },

    /// A `resource` or `module` block has a malformed header.
    #[error("invalid declaration in `{origin}`: {message}")]
    Declaration {
        /// The file containing the declaration.
        origin: String,
        /// Describes what is wrong with the header.
        message: String,
    },

    /// Represents generic IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Represents an invalid glob pattern.
    #[error("invalid glob pattern `{pattern}`")]
    GlobPattern {
        /// The pattern that caused the error.
        pattern: String,
        /// The underlying error.
        source: glob::PatternError,
    },

    /// A git invocation failed.
    #[error("`git {command}` failed: {stderr}")]
    Git {
        /// The git arguments that were used.
        command: String,
        /// Whatever git printed to stderr.
        stderr: String,
    },

    /// Error emitted by serde_json.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn new<S: ToString>(message: S) -> Self {
        Self::Message(message.to_string())
    }

    pub(crate) fn glob_pattern<T>(pattern: T, source: glob::PatternError) -> Self
    where
        T: ToString,
    {
        Self::GlobPattern {
            pattern: pattern.to_string(),
            source,
        }
    }

    pub(crate) fn declaration<O, M>(origin: O, message: M) -> Self
    where
        O: ToString,
        M: ToString,
    {
        Self::Declaration {
            origin: origin.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns `true` if the error was caused by malformed input rather than by a failure to
    /// obtain the input.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Encoding { .. } | Self::Declaration { .. }
        )
    }
}
