//! Raw configuration documents as handed to the parser.

use std::fmt;

/// A single configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Identifies the file in error messages, e.g. a path or `<rev>:<path>`.
    pub origin: String,
    /// The raw file content.
    pub content: Vec<u8>,
}

impl File {
    /// Creates a new `File`.
    pub fn new<O, C>(origin: O, content: C) -> Self
    where
        O: Into<String>,
        C: Into<Vec<u8>>,
    {
        File {
            origin: origin.into(),
            content: content.into(),
        }
    }
}

/// One side of a comparison: an ordered list of configuration files.
///
/// The order matters if declarations collide by name: declarations from later files replace
/// those from earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    files: Vec<File>,
}

impl Document {
    /// Creates an empty `Document`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file.
    pub fn push(&mut self, file: File) {
        self.files.push(file);
    }

    /// The files in this document in order.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Returns `true` if the document contains no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl From<File> for Document {
    fn from(file: File) -> Self {
        Document { files: vec![file] }
    }
}

impl FromIterator<File> for Document {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = File>,
    {
        Document {
            files: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origins: Vec<&str> = self.files.iter().map(|f| f.origin.as_str()).collect();
        write!(f, "[{}]", origins.join(", "))
    }
}
