//! Rust element extraction.

use crate::extractors::base::{
    ExtractionContext, find_nodes_by_kind, find_parent_of_kind, guard, split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind, Visibility};
use tree_sitter::{Node, Tree};

#[derive(Debug)]
pub struct RustExtractor;

impl ElementExtractor for RustExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("rust", source);
        find_nodes_by_kind(root, &["function_item"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let kind = if find_parent_of_kind(&node, &["impl_item", "trait_item"]).is_some()
                    {
                        ElementKind::Method
                    } else {
                        ElementKind::Function
                    };
                    let mut element = ctx.element(&node, name, kind);
                    element.parameters = ctx
                        .field_text(&node, "parameters")
                        .map(|raw| split_parameters(&raw));
                    element.return_type = ctx
                        .field_text(&node, "return_type")
                        .map(|t| t.trim().to_string());
                    element.visibility = Some(rust_visibility(&node));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("rust", source);
        find_nodes_by_kind(root, &["struct_item", "enum_item", "trait_item"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let kind = match node.kind() {
                        "struct_item" => ElementKind::Struct,
                        "enum_item" => ElementKind::Enum,
                        _ => ElementKind::Interface,
                    };
                    let mut element = ctx.element(&node, name, kind);
                    element.visibility = Some(rust_visibility(&node));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("rust", source);
        find_nodes_by_kind(root, &["const_item", "static_item"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let mut element = ctx.element(&node, name, ElementKind::Constant);
                    element.return_type = ctx.field_text(&node, "type");
                    element.visibility = Some(rust_visibility(&node));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("rust", source);
        find_nodes_by_kind(root, &["use_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let module = ctx.field_text(&node, "argument")?;
                    let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                    element.module = Some(module);
                    Some(element)
                })
            })
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "rust"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".rs"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["functions", "classes", "imports"]
    }
}

fn rust_visibility(node: &Node) -> Visibility {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "visibility_modifier" {
                return Visibility::Public;
            }
        }
    }
    Visibility::Private
}
