//! Go element extraction. Visibility follows the exported-identifier rule.

use crate::extractors::base::{
    ExtractionContext, find_first_of_kind, find_nodes_by_kind, guard, split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind, Visibility};
use tree_sitter::Tree;

#[derive(Debug)]
pub struct GoExtractor;

impl ElementExtractor for GoExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("go", source);
        find_nodes_by_kind(root, &["function_declaration", "method_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let kind = if node.kind() == "method_declaration" {
                        ElementKind::Method
                    } else {
                        ElementKind::Function
                    };
                    let mut element = ctx.element(&node, name, kind);
                    element.parameters = ctx
                        .field_text(&node, "parameters")
                        .map(|raw| split_parameters(&raw));
                    element.return_type = ctx.field_text(&node, "result");
                    element.visibility = Some(exported_visibility(&element.name));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("go", source);
        find_nodes_by_kind(root, &["type_spec"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let kind = match node.child_by_field_name("type").map(|t| t.kind()) {
                        Some("struct_type") => ElementKind::Struct,
                        Some("interface_type") => ElementKind::Interface,
                        _ => return None,
                    };
                    let mut element = ctx.element(&node, name, kind);
                    element.visibility = Some(exported_visibility(&element.name));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("go", source);
        find_nodes_by_kind(root, &["const_spec", "var_spec"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let kind = if node.kind() == "const_spec" {
                        ElementKind::Constant
                    } else {
                        ElementKind::Variable
                    };
                    let mut element = ctx.element(&node, name, kind);
                    element.return_type = ctx.field_text(&node, "type");
                    element.visibility = Some(exported_visibility(&element.name));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("go", source);
        find_nodes_by_kind(root, &["import_spec"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let path = find_first_of_kind(node, "interpreted_string_literal")
                        .map(|p| ctx.node_text(&p))?;
                    let module = path.trim_matches('"').to_string();
                    let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                    element.module = Some(module);
                    Some(element)
                })
            })
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["functions", "classes", "imports"]
    }
}

fn exported_visibility(name: &str) -> Visibility {
    if name.chars().next().is_some_and(|c| c.is_uppercase()) {
        Visibility::Public
    } else {
        Visibility::Private
    }
}
