//! Renders a [`ChangeSet`] for consumption by other tools.

use crate::diff::{Change, ChangeSet};
use crate::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Printed in `Targets` format when nothing changed. Tells terraform to skip the refresh.
pub const NO_CHANGES: &str = "-refresh=false";

/// Output formats supported by [`render`].
#[derive(ValueEnum, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Format {
    /// `-target <name>` arguments for `terraform plan/apply`, or `-refresh=false` if nothing
    /// changed.
    #[default]
    Targets,
    /// One declaration name per line.
    Lines,
    /// A JSON array of objects with `name` and `change` fields.
    Json,
}

impl Format {
    /// Returns the name of the `Format`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Targets => "targets",
            Format::Lines => "lines",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    change: Change,
}

/// Renders the change set in the requested format. Names are always emitted in lexical order.
///
/// ## Example
///
/// ```
/// use tfdiff::{diff::diff, parse, render::{render, Format}};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let base = parse::from_str(r#"resource "aws_instance" "a" { ami = "x" }"#)?;
/// let target = parse::from_str(r#"resource "aws_instance" "a" { ami = "y" }"#)?;
///
/// let changes = diff(&base, &target);
///
/// assert_eq!(render(&changes, Format::Targets)?, "-target aws_instance.a ");
/// assert_eq!(render(&diff(&base, &base), Format::Targets)?, "-refresh=false");
/// #   Ok(())
/// # }
/// ```
///
/// ## Errors
///
/// Only the `Json` format can fail, if serialization fails.
pub fn render(changes: &ChangeSet, format: Format) -> Result<String> {
    match format {
        Format::Targets => Ok(render_targets(changes)),
        Format::Lines => Ok(changes.names().map(|name| format!("{name}\n")).collect()),
        Format::Json => {
            let entries: Vec<Entry> = changes
                .iter()
                .map(|(name, change)| Entry {
                    name,
                    change: *change,
                })
                .collect();

            Ok(serde_json::to_string(&entries)?)
        }
    }
}

fn render_targets(changes: &ChangeSet) -> String {
    if changes.is_empty() {
        NO_CHANGES.to_owned()
    } else {
        changes
            .names()
            .map(|name| format!("-target {name} "))
            .collect()
    }
}
