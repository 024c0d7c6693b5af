//! C element extraction.

use crate::extractors::base::{
    ExtractionContext, find_first_of_kind, find_nodes_by_kind, find_parent_of_kind, guard,
    split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::{Node, Tree};

#[derive(Debug)]
pub struct CExtractor;

impl ElementExtractor for CExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("c", source);
        find_nodes_by_kind(root, &["function_definition"])
            .into_iter()
            .filter_map(|node| guard(node.kind(), || function_element(&ctx, node, "c")))
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("c", source);
        collect_type_specifiers(&ctx, root, &["struct_specifier", "enum_specifier"])
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("c", source);
        collect_toplevel_declarations(&ctx, root)
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("c", source);
        collect_includes(&ctx, root)
    }

    fn language_name(&self) -> &'static str {
        "c"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".c", ".h"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &[]
    }
}

pub(crate) fn function_element(
    ctx: &ExtractionContext,
    node: Node,
    _language: &str,
) -> Option<Element> {
    let declarator = find_first_of_kind(node, "function_declarator")?;
    let name = find_first_of_kind(declarator, "identifier")
        .or_else(|| find_first_of_kind(declarator, "field_identifier"))
        .map(|n| ctx.node_text(&n))?;
    let kind = if find_parent_of_kind(&node, &["class_specifier"]).is_some() {
        ElementKind::Method
    } else {
        ElementKind::Function
    };
    let mut element = ctx.element(&node, name, kind);
    element.parameters = find_first_of_kind(declarator, "parameter_list")
        .map(|p| split_parameters(&ctx.node_text(&p)));
    element.return_type = ctx.field_text(&node, "type").map(|t| t.trim().to_string());
    Some(element)
}

pub(crate) fn collect_type_specifiers(
    ctx: &ExtractionContext,
    root: Node,
    kinds: &[&str],
) -> Vec<Element> {
    find_nodes_by_kind(root, kinds)
        .into_iter()
        .filter_map(|node| {
            guard(node.kind(), || {
                // Forward declarations carry no body and are skipped.
                node.child_by_field_name("body")?;
                let name = ctx.field_text(&node, "name")?;
                let kind = match node.kind() {
                    "enum_specifier" => ElementKind::Enum,
                    "class_specifier" => ElementKind::Class,
                    _ => ElementKind::Struct,
                };
                Some(ctx.element(&node, name, kind))
            })
        })
        .collect()
}

pub(crate) fn collect_toplevel_declarations(ctx: &ExtractionContext, root: Node) -> Vec<Element> {
    find_nodes_by_kind(root, &["declaration"])
        .into_iter()
        .filter(|node| find_parent_of_kind(node, &["function_definition"]).is_none())
        .filter_map(|node| {
            guard(node.kind(), || {
                let declarator = node.child_by_field_name("declarator")?;
                if declarator.kind() == "function_declarator" {
                    return None;
                }
                let name = find_first_of_kind(declarator, "identifier")
                    .map(|n| ctx.node_text(&n))
                    .filter(|n| !n.is_empty())?;
                let mut element = ctx.element(&node, name, ElementKind::Variable);
                element.return_type = ctx.field_text(&node, "type").map(|t| t.trim().to_string());
                Some(element)
            })
        })
        .collect()
}

pub(crate) fn collect_includes(ctx: &ExtractionContext, root: Node) -> Vec<Element> {
    find_nodes_by_kind(root, &["preproc_include"])
        .into_iter()
        .filter_map(|node| {
            guard(node.kind(), || {
                let path = ctx.field_text(&node, "path")?;
                let module = path.trim_matches(['"', '<', '>']).to_string();
                let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                element.module = Some(module);
                Some(element)
            })
        })
        .collect()
}
