//! Ruby element extraction.

use crate::extractors::base::{
    ExtractionContext, find_first_of_kind, find_nodes_by_kind, find_parent_of_kind, guard,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::Tree;

#[derive(Debug)]
pub struct RubyExtractor;

impl ElementExtractor for RubyExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("ruby", source);
        find_nodes_by_kind(root, &["method", "singleton_method"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let kind = if find_parent_of_kind(&node, &["class", "module"]).is_some() {
                        ElementKind::Method
                    } else {
                        ElementKind::Function
                    };
                    let mut element = ctx.element(&node, name, kind);
                    element.parameters = node
                        .child_by_field_name("parameters")
                        .map(|p| {
                            (0..p.named_child_count())
                                .filter_map(|i| p.named_child(i))
                                .map(|c| ctx.node_text(&c))
                                .collect()
                        });
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("ruby", source);
        find_nodes_by_kind(root, &["class", "module"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    Some(ctx.element(&node, name, ElementKind::Class))
                })
            })
            .collect()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("ruby", source);
        find_nodes_by_kind(root, &["assignment"])
            .into_iter()
            .filter(|node| find_parent_of_kind(node, &["method", "singleton_method"]).is_none())
            .filter_map(|node| {
                guard(node.kind(), || {
                    let left = node.child_by_field_name("left")?;
                    let kind = match left.kind() {
                        "constant" => ElementKind::Constant,
                        "identifier" | "instance_variable" | "class_variable" => {
                            ElementKind::Variable
                        }
                        _ => return None,
                    };
                    Some(ctx.element(&node, ctx.node_text(&left), kind))
                })
            })
            .collect()
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("ruby", source);
        find_nodes_by_kind(root, &["call"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let method = ctx.field_text(&node, "method")?;
                    if method != "require" && method != "require_relative" {
                        return None;
                    }
                    let arguments = node.child_by_field_name("arguments")?;
                    let module = find_first_of_kind(arguments, "string_content")
                        .map(|s| ctx.node_text(&s))?;
                    let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                    element.module = Some(module);
                    Some(element)
                })
            })
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "ruby"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".rb"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &[]
    }
}
