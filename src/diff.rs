//! Structural comparison of two [`Collection`]s.
//!
//! Declarations are compared as a whole: a difference anywhere in the attribute or block tree
//! of a declaration marks the declaration as modified. There is no finer-grained reporting
//! because the consumer (`terraform -target`) works on declaration granularity anyway.

use crate::model::Collection;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// How a declaration changed between base and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    /// Only present in the target.
    Added,
    /// Only present in the base.
    Removed,
    /// Present in both, but the declarations differ.
    Modified,
}

impl Change {
    /// The change as seen from the other direction.
    pub fn inverse(self) -> Change {
        match self {
            Change::Added => Change::Removed,
            Change::Removed => Change::Added,
            Change::Modified => Change::Modified,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added => f.write_str("added"),
            Change::Removed => f.write_str("removed"),
            Change::Modified => f.write_str("modified"),
        }
    }
}

/// The declarations that differ between two collections, keyed by declaration name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<String, Change>,
}

impl ChangeSet {
    /// Iterates over the names of all changed declarations in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    /// Iterates over `(name, change)` pairs in lexical name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Change> {
        self.changes.iter()
    }

    /// Returns the change recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<Change> {
        self.changes.get(name).copied()
    }

    /// Returns `true` if `name` changed.
    pub fn contains(&self, name: &str) -> bool {
        self.changes.contains_key(name)
    }

    /// The number of changed declarations.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a String, &'a Change);
    type IntoIter = btree_map::Iter<'a, String, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Computes the set of declarations that were added, removed or modified between `base` and
/// `target`.
///
/// The set of changed names is symmetric: `diff(a, b)` and `diff(b, a)` report the same names,
/// only `Added` and `Removed` swap.
///
/// ## Example
///
/// ```
/// use tfdiff::{diff::{diff, Change}, parse};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let base = parse::from_str(r#"resource "aws_instance" "a" { ami = "x" }"#)?;
/// let target = parse::from_str(r#"resource "aws_instance" "b" { ami = "x" }"#)?;
///
/// let changes = diff(&base, &target);
///
/// assert_eq!(changes.get("aws_instance.a"), Some(Change::Removed));
/// assert_eq!(changes.get("aws_instance.b"), Some(Change::Added));
/// #   Ok(())
/// # }
/// ```
pub fn diff(base: &Collection, target: &Collection) -> ChangeSet {
    let mut changes = BTreeMap::new();

    for decl in base.iter() {
        match target.get(&decl.name) {
            None => {
                changes.insert(decl.name.clone(), Change::Removed);
            }
            Some(other) if other != decl => {
                changes.insert(decl.name.clone(), Change::Modified);
            }
            Some(_) => {}
        }
    }

    for name in target.names().filter(|name| !base.contains(name)) {
        changes.insert(name.to_owned(), Change::Added);
    }

    tracing::info!(
        base = base.len(),
        target = target.len(),
        changed = changes.len(),
        "compared declarations"
    );

    ChangeSet { changes }
}
