//! C# element extraction.

use crate::extractors::base::{
    ExtractionContext, find_first_of_kind, find_nodes_by_kind, guard, split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::Tree;

#[derive(Debug)]
pub struct CSharpExtractor;

impl ElementExtractor for CSharpExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("csharp", source);
        find_nodes_by_kind(root, &["method_declaration", "constructor_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let mut element = ctx.element(&node, name, ElementKind::Method);
                    element.parameters = ctx
                        .field_text(&node, "parameters")
                        .map(|raw| split_parameters(&raw));
                    element.return_type = ctx.field_text(&node, "returns");
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
        let ctx = ExtractionContext::new("csharp", source);
        find_nodes_by_kind(
            root,
            &[
                "class_declaration",
                "interface_declaration",
                "struct_declaration",
                "enum_declaration",
            ],
        )
        .into_iter()
        .filter_map(|node| {
            guard(node.kind(), || {
                let name = ctx.field_text(&node, "name")?;
                let kind = match node.kind() {
                    "interface_declaration" => ElementKind::Interface,
                    "struct_declaration" => ElementKind::Struct,
                    "enum_declaration" => ElementKind::Enum,
                    _ => ElementKind::Class,
                };
                let mut element = ctx.element(&node, name, kind);
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
        let ctx = ExtractionContext::new("csharp", source);
        find_nodes_by_kind(root, &["field_declaration", "property_declaration"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = if node.kind() == "property_declaration" {
                        ctx.field_text(&node, "name")?
                    } else {
                        let declarator = find_first_of_kind(node, "variable_declarator")?;
                        find_first_of_kind(declarator, "identifier")
                            .map(|n| ctx.node_text(&n))?
                    };
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
        let ctx = ExtractionContext::new("csharp", source);
        find_nodes_by_kind(root, &["using_directive"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let module = find_first_of_kind(node, "qualified_name")
                        .or_else(|| find_first_of_kind(node, "identifier"))
                        .map(|n| ctx.node_text(&n))?;
                    let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                    element.module = Some(module);
                    Some(element)
                })
            })
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "csharp"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".cs"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &[]
    }
}
