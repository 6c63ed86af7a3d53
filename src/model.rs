//! The structural model that configuration documents are parsed into.

use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// All declarations parsed from one document, keyed by declaration name.
///
/// Inserting a declaration whose name is already present replaces the existing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    declarations: BTreeMap<String, Declaration>,
}

impl Collection {
    /// Creates an empty `Collection`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a declaration, returning the one it replaced if the name was already taken.
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        self.declarations
            .insert(declaration.name.clone(), declaration)
    }

    /// Moves all declarations of `other` into `self`. Declarations of `other` win on name
    /// collisions.
    pub fn merge(&mut self, other: Collection) {
        self.declarations.extend(other.declarations);
    }

    /// Returns the declaration with the given name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Returns `true` if a declaration with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Iterates over all declaration names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Iterates over all declarations in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Returns the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if the collection holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<Declaration> for Collection {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut collection = Collection::new();
        iter.into_iter().for_each(|decl| {
            collection.insert(decl);
        });
        collection
    }
}

/// The kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A `resource "<type>" "<label>"` block.
    Resource,
    /// A `module "<label>"` block.
    Module,
}

impl Kind {
    /// Returns the kind for a block identifier, or `None` if blocks with this identifier are
    /// not tracked.
    pub fn from_identifier(ident: &str) -> Option<Kind> {
        match ident {
            "resource" => Some(Kind::Resource),
            "module" => Some(Kind::Module),
            _ => None,
        }
    }

    /// The number of labels a block of this kind must have.
    pub fn label_count(&self) -> usize {
        match self {
            Kind::Resource => 2,
            Kind::Module => 1,
        }
    }

    /// Builds the declaration name from the block labels, e.g. `aws_instance.web` or
    /// `module.network`.
    ///
    /// Returns `None` if the number of labels does not match `label_count`.
    pub fn name<S>(&self, labels: &[S]) -> Option<String>
    where
        S: AsRef<str>,
    {
        match (self, labels) {
            (Kind::Resource, [ty, label]) => Some(format!("{}.{}", ty.as_ref(), label.as_ref())),
            (Kind::Module, [label]) => Some(format!("module.{}", label.as_ref())),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Resource => f.write_str("resource"),
            Kind::Module => f.write_str("module"),
        }
    }
}

/// A named top-level `resource` or `module` block.
///
/// Two declarations are equal if their names and bodies are equal. The kind is not compared: a
/// `resource "module" "a"` and a `module "a"` share the name `module.a` and are
/// indistinguishable once named.
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    /// The unique name, e.g. `aws_instance.web`.
    pub name: String,
    /// Whether this is a resource or a module.
    pub kind: Kind,
    /// Attributes and nested blocks of the declaration.
    pub body: Block,
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.body == other.body
    }
}

/// Attributes and nested blocks of a declaration or of another block.
///
/// Only one nested block per block type is retained. When a body contains several sibling
/// blocks of the same type, e.g. multiple `ingress` blocks, the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    /// Evaluated attributes keyed by attribute name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    /// Nested blocks keyed by block type.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub blocks: BTreeMap<String, Block>,
}

impl Block {
    /// Returns `true` if the block has neither attributes nor nested blocks.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.blocks.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decl(name: &str, ami: &str) -> Declaration {
        let mut body = Block::default();
        body.attributes
            .insert("ami".into(), Value::String(ami.into()));

        Declaration {
            name: name.into(),
            kind: Kind::Resource,
            body,
        }
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(
            Kind::Resource.name(&["aws_instance", "web"]),
            Some("aws_instance.web".into())
        );
        assert_eq!(Kind::Module.name(&["net"]), Some("module.net".into()));
        assert_eq!(Kind::Resource.name(&["aws_instance"]), None);
        assert_eq!(Kind::Module.name(&["a", "b"]), None);
        assert_eq!(Kind::from_identifier("data"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut collection = Collection::new();
        assert!(collection.insert(decl("aws_instance.a", "x")).is_none());
        assert_eq!(
            collection.insert(decl("aws_instance.a", "y")),
            Some(decl("aws_instance.a", "x"))
        );
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("aws_instance.a"), Some(&decl("aws_instance.a", "y")));
    }

    #[test]
    fn test_merge() {
        let mut a: Collection = vec![decl("aws_instance.a", "x"), decl("aws_instance.b", "x")]
            .into_iter()
            .collect();
        let b: Collection = vec![decl("aws_instance.b", "y")].into_iter().collect();

        a.merge(b);

        assert_eq!(a.names().collect::<Vec<_>>(), vec!["aws_instance.a", "aws_instance.b"]);
        assert_eq!(a.get("aws_instance.b"), Some(&decl("aws_instance.b", "y")));
    }

    #[test]
    fn test_declaration_eq_ignores_kind() {
        let module = Declaration {
            kind: Kind::Module,
            ..decl("module.a", "x")
        };

        assert_eq!(module, decl("module.a", "x"));
        assert_ne!(module, decl("module.a", "y"));
        assert_ne!(module, decl("module.b", "x"));
    }

    #[test]
    fn test_empty_block_eq() {
        assert_eq!(Block::default(), Block::default());
        assert!(Block::default().is_empty());
    }

    #[test]
    fn test_serialize() {
        let collection: Collection = vec![decl("aws_instance.a", "x")].into_iter().collect();

        assert_eq!(
            serde_json::to_string(&collection).unwrap(),
            r#"{"aws_instance.a":{"name":"aws_instance.a","kind":"resource","body":{"attributes":{"ami":"x"}}}}"#
        );
    }
}
