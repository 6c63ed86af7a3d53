//! tfdiff detects which terraform `resource` and `module` declarations changed between two
//! versions of a configuration directory and renders them as `-target` flags.
//!
//! The heavy lifting happens in two steps:
//!
//! 1. [`parse`] turns HCL documents into a [`Collection`] of declarations.
//! 2. [`diff::diff`] compares two collections and returns a [`ChangeSet`].
//!
//! [`Source`] and [`git`] provide the documents, [`render`] formats the result.
//!
//! ## Example
//!
//! ```
//! use tfdiff::{diff::diff, parse, render::{render, Format}};
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let base = parse::from_str(r#"resource "aws_instance" "a" { ami = "x" }"#)?;
//! let target = parse::from_str(r#"
//! resource "aws_instance" "a" { ami = "y" }
//! resource "aws_instance" "b" { ami = "z" }
//! "#)?;
//!
//! let changes = diff(&base, &target);
//!
//! assert_eq!(
//!     render(&changes, Format::Targets)?,
//!     "-target aws_instance.a -target aws_instance.b "
//! );
//! #   Ok(())
//! # }
//! ```
#![warn(missing_docs)]

use std::fs::canonicalize;
use std::path::{Path, PathBuf};

pub use diff::{Change, ChangeSet};
pub use document::{Document, File};
pub use error::*;
pub use model::{Block, Collection, Declaration, Kind};
pub use source::Source;
pub use value::{Number, Value};

pub mod diff;
mod document;
mod error;
pub mod git;
mod model;
pub mod parse;
pub mod render;
pub mod source;
pub mod value;

trait PathExt {
    /// The path relative to the current directory, if both can be resolved.
    fn relative_to_cwd(&self) -> Option<PathBuf>;

    /// Files directly matching `pattern` inside of this directory.
    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

impl<T> PathExt for T
where
    T: AsRef<Path>,
{
    fn relative_to_cwd(&self) -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        pathdiff::diff_paths(canonicalize(self).ok()?, canonicalize(cwd).ok()?)
    }

    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let dir = glob::Pattern::escape(&self.as_ref().to_string_lossy());
        let full_pattern = Path::new(&dir).join(pattern);

        glob::glob(&full_pattern.to_string_lossy())
            .map_err(|err| Error::glob_pattern(pattern, err))?
            .filter_map(|result| match result {
                Ok(path) => path.is_file().then(|| Ok(path)),
                Err(err) => Some(Err(err.into_error().into())),
            })
            .collect()
    }
}
