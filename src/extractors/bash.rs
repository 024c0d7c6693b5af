//! Bash element extraction.

use crate::extractors::base::{ExtractionContext, find_nodes_by_kind, guard};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::Tree;

#[derive(Debug)]
pub struct BashExtractor;

impl ElementExtractor for BashExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("bash", source);
        find_nodes_by_kind(root, &["function_definition"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    Some(ctx.element(&node, name, ElementKind::Function))
                })
            })
            .collect()
    }

    fn extract_classes(&self, _tree: Option<&Tree>, _source: &str) -> Vec<Element> {
        Vec::new()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("bash", source);
        find_nodes_by_kind(root, &["variable_assignment"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    Some(ctx.element(&node, name, ElementKind::Variable))
                })
            })
            .collect()
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("bash", source);
        find_nodes_by_kind(root, &["command"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let command = ctx.field_text(&node, "name")?;
                    if command != "source" && command != "." {
                        return None;
                    }
                    let argument = node.child_by_field_name("argument")?;
                    let module = ctx.node_text(&argument).trim_matches('"').to_string();
                    let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                    element.module = Some(module);
                    Some(element)
                })
            })
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "bash"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".sh", ".bash"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &[]
    }
}
