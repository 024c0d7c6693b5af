//! Language extractor plugins.
//!
//! Each module implements [`ElementExtractor`] over a parsed tree-sitter tree.
//! The contract is deliberately small: four element extractions plus identity
//! metadata. Grammar-specific traversal lives entirely inside the plugin.

pub mod base;

pub mod bash;
pub mod c;
pub mod cpp;
pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod sql;
pub mod typescript;

use crate::model::Element;
use tree_sitter::{Node, Tree};

/// Contract every language plugin satisfies.
///
/// Implementations must accept a missing tree and empty source without
/// panicking, returning empty sequences.
pub trait ElementExtractor: Send + Sync + std::fmt::Debug {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element>;
    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element>;
    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element>;
    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element>;

    fn language_name(&self) -> &'static str;
    /// Declared extensions, including the leading dot.
    fn file_extensions(&self) -> &'static [&'static str];
    /// Query names this plugin's language supports in the query executor.
    fn supported_queries(&self) -> &'static [&'static str];
}

/// Root node when there is anything to extract; `None` short-circuits the
/// null-tree/empty-source contract cases.
pub(crate) fn root_node<'t>(tree: Option<&'t Tree>, source: &str) -> Option<Node<'t>> {
    let tree = tree?;
    if source.is_empty() {
        return None;
    }
    Some(tree.root_node())
}
