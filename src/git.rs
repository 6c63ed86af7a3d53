//! A wrapper for the `git` command.
//!
//! Files are read straight from the object database via `git ls-tree` and `git show`, so
//! loading another revision never touches the working tree.

use crate::document::{Document, File};
use crate::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A git repository together with the location of a directory inside of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    toplevel: PathBuf,
    prefix: String,
}

impl Repository {
    /// Discovers the repository that contains `dir`.
    ///
    /// ## Errors
    ///
    /// Returns an error if `git` is not installed or `dir` is not inside of a git work tree.
    pub fn discover<P>(dir: P) -> Result<Repository>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let toplevel = git(dir, &["rev-parse", "--show-toplevel"])?;
        let prefix = git(dir, &["rev-parse", "--show-prefix"])?;

        Ok(Repository {
            toplevel: PathBuf::from(toplevel.trim()),
            prefix: prefix.trim().to_owned(),
        })
    }

    /// The top level directory of the work tree.
    pub fn toplevel(&self) -> &Path {
        &self.toplevel
    }

    /// The path of the discovered directory relative to the top level, with a trailing `/`
    /// unless it is empty.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if `rev` resolves to a commit.
    pub fn has_revision(&self, rev: &str) -> bool {
        self.resolves(&format!("{rev}^{{commit}}"))
    }

    fn resolves(&self, spec: &str) -> bool {
        git(&self.toplevel, &["rev-parse", "--verify", "--quiet", spec]).is_ok()
    }

    /// Picks the default base branch: `master` if it exists, otherwise `main`.
    ///
    /// ## Errors
    ///
    /// Returns an error if neither branch exists.
    pub fn default_branch(&self) -> Result<String> {
        ["master", "main"]
            .into_iter()
            .find(|branch| self.has_revision(&format!("refs/heads/{branch}")))
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::new("unable to detect base branch, neither `main` nor `master` exist")
            })
    }

    /// Reads all files directly inside the discovered directory at revision `rev` whose file
    /// name matches `pattern`. Files are returned in lexical order.
    ///
    /// If the directory does not exist at `rev` (e.g. it was added after `rev`), the returned
    /// document is empty.
    ///
    /// ## Errors
    ///
    /// Returns an error if the pattern is invalid, `rev` does not exist or git fails for any
    /// other reason.
    pub fn document_at(&self, rev: &str, pattern: &str) -> Result<Document> {
        let pattern =
            glob::Pattern::new(pattern).map_err(|err| Error::glob_pattern(pattern, err))?;

        let treeish = if self.prefix.is_empty() {
            rev.to_owned()
        } else {
            format!("{}:{}", rev, self.prefix.trim_end_matches('/'))
        };

        if !self.prefix.is_empty()
            && !self.resolves(&format!("{treeish}^{{tree}}"))
            && self.has_revision(rev)
        {
            tracing::debug!(rev, prefix = %self.prefix, "directory does not exist at revision");
            return Ok(Document::new());
        }

        let listing = git(&self.toplevel, &["ls-tree", "-z", &treeish])?;

        let mut names: Vec<&str> = listing
            .split('\0')
            .filter_map(|entry| {
                let (meta, name) = entry.split_once('\t')?;
                let is_blob = meta.split(' ').nth(1) == Some("blob");
                (is_blob && pattern.matches(name)).then_some(name)
            })
            .collect();

        names.sort_unstable();

        names
            .into_iter()
            .map(|name| {
                let path = format!("{}{}", self.prefix, name);
                let object = format!("{rev}:{path}");
                let content = git_bytes(&self.toplevel, &["show", &object])?;
                tracing::debug!(%object, bytes = content.len(), "read file from revision");
                Ok(File::new(object, content))
            })
            .collect()
    }
}

fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let stdout = git_bytes(dir, args)?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn git_bytes(dir: &Path, args: &[&str]) -> Result<Vec<u8>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|err| {
            if let io::ErrorKind::NotFound = err.kind() {
                Error::new("executable `git` not found")
            } else {
                Error::Io(err)
            }
        })?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(Error::Git {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}
