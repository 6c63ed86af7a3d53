//! Sources that provide the configuration documents to compare.

use crate::document::{Document, File};
use crate::git::Repository;
use crate::{PathExt, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The default pattern for selecting configuration files.
pub const DEFAULT_PATTERN: &str = "*.tf";

/// A source for one side of the comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Files in a local directory as they currently are on disk.
    Dir(PathBuf),
    /// Files in a directory of a git work tree as they exist at a revision.
    Revision {
        /// Directory inside of the work tree.
        dir: PathBuf,
        /// Any revision git understands, e.g. a branch name or a commit hash.
        rev: String,
    },
}

impl Source {
    /// Creates a `Source` for the revision `rev` of the repository that contains `dir`.
    pub fn revision<P, R>(dir: P, rev: R) -> Self
    where
        P: AsRef<Path>,
        R: Into<String>,
    {
        Self::Revision {
            dir: dir.as_ref().to_path_buf(),
            rev: rev.into(),
        }
    }

    /// Loads all files matching `pattern` (non-recursive) in lexical path order.
    ///
    /// ## Errors
    ///
    /// Returns an error if the pattern is invalid, a file cannot be read or, for
    /// `Source::Revision`, if git fails.
    pub fn load(&self, pattern: &str) -> Result<Document> {
        let document = match self {
            Self::Dir(dir) => {
                let mut paths = dir.glob_files(pattern)?;
                paths.sort();

                paths
                    .into_iter()
                    .map(|path| {
                        let content = fs::read(&path)?;
                        let origin = path
                            .relative_to_cwd()
                            .unwrap_or_else(|| path.clone())
                            .display()
                            .to_string();
                        tracing::debug!(%origin, bytes = content.len(), "read file");
                        Ok(File::new(origin, content))
                    })
                    .collect::<Result<Document>>()?
            }
            Self::Revision { dir, rev } => Repository::discover(dir)?.document_at(rev, pattern)?,
        };

        if document.is_empty() {
            tracing::warn!(source = %self, pattern, "no configuration files found");
        }

        Ok(document)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::Dir(path.to_path_buf())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir(path) => path
                .relative_to_cwd()
                .unwrap_or_else(|| path.clone())
                .display()
                .fmt(f),
            Self::Revision { rev, .. } => write!(f, "revision `{rev}`"),
        }
    }
}
