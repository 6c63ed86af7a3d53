//! Parses HCL documents into a [`Collection`] of `resource` and `module` declarations.
//!
//! Attribute expressions are evaluated without any variables or functions in scope. An
//! expression that references something outside of the document (e.g. `var.region` or
//! `aws_vpc.main.id`) does not fail the parse but yields [`Value::Unknown`] instead. This
//! leniency also means that a malformed expression that is still syntactically valid HCL is
//! never reported.
//!
//! ## Example
//!
//! ```
//! use tfdiff::parse;
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let collection = parse::from_str(r#"
//! resource "aws_instance" "web" {
//!   ami = "ami-123"
//! }
//!
//! module "network" {
//!   source = "./network"
//! }
//!
//! variable "region" {}
//! "#)?;
//!
//! assert_eq!(collection.names().collect::<Vec<_>>(), vec!["aws_instance.web", "module.network"]);
//! #   Ok(())
//! # }
//! ```

use crate::document::{Document, File};
use crate::model::{Block, Collection, Declaration, Kind};
use crate::value::Value;
use crate::{Error, Result};
use hcl::eval::{Context, Evaluate};
use hcl::{Body, Structure};

const INLINE_ORIGIN: &str = "<inline>";

/// Parses a HCL string.
///
/// ## Errors
///
/// Returns an error if `s` is not valid HCL or if a `resource` or `module` block does not have
/// the expected number of labels.
pub fn from_str(s: &str) -> Result<Collection> {
    parse_named(INLINE_ORIGIN, s)
}

/// Parses HCL from a byte slice.
///
/// ## Errors
///
/// Returns an error if `bytes` is not valid UTF-8 or not valid HCL.
pub fn from_slice(bytes: &[u8]) -> Result<Collection> {
    parse_file(&File::new(INLINE_ORIGIN, bytes))
}

/// Parses all files of a document and merges the results in file order.
///
/// A declaration in a later file replaces a declaration with the same name from an earlier file.
///
/// ## Errors
///
/// Returns the error of the first file that fails to parse. No partial result is returned.
pub fn from_document(document: &Document) -> Result<Collection> {
    document
        .files()
        .iter()
        .try_fold(Collection::new(), |mut collection, file| {
            collection.merge(parse_file(file)?);
            Ok(collection)
        })
}

fn parse_file(file: &File) -> Result<Collection> {
    let s = std::str::from_utf8(&file.content).map_err(|source| Error::Encoding {
        origin: file.origin.clone(),
        source,
    })?;

    parse_named(&file.origin, s)
}

fn parse_named(origin: &str, s: &str) -> Result<Collection> {
    let body = hcl::parse(s).map_err(|source| Error::Parse {
        origin: origin.to_owned(),
        source,
    })?;

    let ctx = Context::new();
    let mut collection = Collection::new();

    for structure in body {
        let block = match structure {
            Structure::Block(block) => block,
            Structure::Attribute(_) => continue,
        };

        let Some(kind) = Kind::from_identifier(block.identifier.as_str()) else {
            continue;
        };

        let labels: Vec<&str> = block.labels.iter().map(|label| label.as_str()).collect();

        let name = kind.name(labels.as_slice()).ok_or_else(|| {
            Error::declaration(
                origin,
                format!(
                    "{} block requires {} label(s), got {}",
                    kind,
                    kind.label_count(),
                    labels.len()
                ),
            )
        })?;

        let declaration = Declaration {
            name,
            kind,
            body: decode_body(block.body, &ctx),
        };

        if let Some(prev) = collection.insert(declaration) {
            tracing::debug!(origin, name = %prev.name, "declaration replaced by later duplicate");
        }
    }

    tracing::debug!(origin, declarations = collection.len(), "parsed file");

    Ok(collection)
}

fn decode_body(body: Body, ctx: &Context) -> Block {
    let mut block = Block::default();

    for structure in body {
        match structure {
            Structure::Attribute(attr) => {
                let value = match attr.expr.evaluate(ctx) {
                    Ok(value) => Value::from(value),
                    Err(err) => {
                        tracing::trace!(key = attr.key.as_str(), %err, "attribute value is unknown");
                        Value::Unknown(attr.expr)
                    }
                };

                block.attributes.insert(attr.key.as_str().to_owned(), value);
            }
            Structure::Block(nested) => {
                let ident = nested.identifier.as_str().to_owned();
                block.blocks.insert(ident, decode_body(nested.body, ctx));
            }
        }
    }

    block
}
