//! Java element extraction.

use crate::extractors::base::{
    ExtractionContext, find_first_of_kind, find_nodes_by_kind, guard, split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::{Node, Tree};

#[derive(Debug)]
pub struct JavaExtractor;

impl ElementExtractor for JavaExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("java", source);
        find_nodes_by_kind(root, &["method_declaration", "constructor_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let mut element = ctx.element(&node, name, ElementKind::Method);
                    element.parameters = ctx
                        .field_text(&node, "parameters")
                        .map(|raw| split_parameters(&raw));
                    element.return_type = ctx.field_text(&node, "type");
                    element.visibility = ctx.visibility(&node);
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("java", source);
        let package = package_name(&ctx, root);
        find_nodes_by_kind(
            root,
            &[
                "class_declaration",
                "interface_declaration",
                "enum_declaration",
            ],
        )
        .into_iter()
        .filter_map(|node| {
            guard(node.kind(), || {
                let name = ctx.field_text(&node, "name")?;
                let kind = match node.kind() {
                    "interface_declaration" => ElementKind::Interface,
                    "enum_declaration" => ElementKind::Enum,
                    _ => ElementKind::Class,
                };
                let mut element = ctx.element(&node, name, kind);
                element.qualified_name = package
                    .as_ref()
                    .map(|pkg| format!("{}.{}", pkg, element.name));
                element.visibility = ctx.visibility(&node);
                Some(element)
            })
        })
        .collect()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("java", source);
        find_nodes_by_kind(root, &["field_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let declarator = find_first_of_kind(node, "variable_declarator")?;
                    let name = ctx.field_text(&declarator, "name")?;
                    let mut element = ctx.element(&node, name, ElementKind::Field);
                    element.return_type = ctx.field_text(&node, "type");
                    element.visibility = ctx.visibility(&node);
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("java", source);
        find_nodes_by_kind(root, &["import_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let module = find_first_of_kind(node, "scoped_identifier")
                        .or_else(|| find_first_of_kind(node, "identifier"))
                        .map(|m| ctx.node_text(&m))?;
                    let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                    element.module = Some(module);
                    Some(element)
                })
            })
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".java"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["functions", "classes", "imports"]
    }
}

fn package_name(ctx: &ExtractionContext, root: Node) -> Option<String> {
    let package = find_first_of_kind(root, "package_declaration")?;
    find_first_of_kind(package, "scoped_identifier")
        .or_else(|| find_first_of_kind(package, "identifier"))
        .map(|n| ctx.node_text(&n))
}
