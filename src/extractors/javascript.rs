//! JavaScript element extraction. Also reused by the TypeScript plugin for
//! the constructs the two grammars share.

use crate::extractors::base::{
    ExtractionContext, find_nodes_by_kind, find_parent_of_kind, guard, split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::{Node, Tree};

const FUNCTION_SCOPES: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "method_definition",
    "arrow_function",
    "function_expression",
    "function",
];

#[derive(Debug)]
pub struct JavaScriptExtractor;

impl ElementExtractor for JavaScriptExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        collect_functions("javascript", tree, source)
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("javascript", source);
        find_nodes_by_kind(root, &["class_declaration"])
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
        collect_variables("javascript", tree, source)
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        collect_imports("javascript", tree, source)
    }

    fn language_name(&self) -> &'static str {
        "javascript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".js", ".mjs", ".cjs", ".jsx"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["functions", "classes", "imports"]
    }
}

pub(crate) fn collect_functions(
    language: &'static str,
    tree: Option<&Tree>,
    source: &str,
) -> Vec<Element> {
    let Some(root) = root_node(tree, source) else {
        return Vec::new();
    };
    let ctx = ExtractionContext::new(language, source);
    let mut elements = Vec::new();

    for node in find_nodes_by_kind(
        root,
        &[
            "function_declaration",
            "generator_function_declaration",
            "method_definition",
        ],
    ) {
        if let Some(element) = guard(node.kind(), || {
            let name = ctx.field_text(&node, "name")?;
            let kind = if node.kind() == "method_definition" {
                ElementKind::Method
            } else {
                ElementKind::Function
            };
            let mut element = ctx.element(&node, name, kind);
            element.parameters = ctx
                .field_text(&node, "parameters")
                .map(|raw| split_parameters(&raw));
            element.return_type = ctx.field_text(&node, "return_type");
            Some(element)
        }) {
            elements.push(element);
        }
    }

    // const f = (..) => { .. } counts as a function, not a variable.
    for node in find_nodes_by_kind(root, &["variable_declarator"]) {
        if let Some(element) = guard(node.kind(), || {
            let value = node.child_by_field_name("value")?;
            if !matches!(value.kind(), "arrow_function" | "function_expression" | "function") {
                return None;
            }
            let name = ctx.field_text(&node, "name")?;
            let mut element = ctx.element(&node, name, ElementKind::Function);
            element.parameters = ctx
                .field_text(&value, "parameters")
                .map(|raw| split_parameters(&raw));
            Some(element)
        }) {
            elements.push(element);
        }
    }

    elements
}

pub(crate) fn collect_variables(
    language: &'static str,
    tree: Option<&Tree>,
    source: &str,
) -> Vec<Element> {
    let Some(root) = root_node(tree, source) else {
        return Vec::new();
    };
    let ctx = ExtractionContext::new(language, source);
    find_nodes_by_kind(root, &["variable_declarator"])
        .into_iter()
        .filter(|node| find_parent_of_kind(node, FUNCTION_SCOPES).is_none())
        .filter_map(|node| {
            guard(node.kind(), || {
                if let Some(value) = node.child_by_field_name("value") {
                    if matches!(value.kind(), "arrow_function" | "function_expression" | "function")
                    {
                        return None;
                    }
                }
                let name = ctx.field_text(&node, "name")?;
                let declaration = node.parent()?;
                let kind = if ctx.node_text(&declaration).trim_start().starts_with("const") {
                    ElementKind::Constant
                } else {
                    ElementKind::Variable
                };
                let mut element = ctx.element(&node, name, kind);
                element.return_type = ctx.field_text(&node, "type");
                Some(element)
            })
        })
        .collect()
}

pub(crate) fn collect_imports(
    language: &'static str,
    tree: Option<&Tree>,
    source: &str,
) -> Vec<Element> {
    let Some(root) = root_node(tree, source) else {
        return Vec::new();
    };
    let ctx = ExtractionContext::new(language, source);
    find_nodes_by_kind(root, &["import_statement"])
        .into_iter()
        .filter_map(|node| {
            guard(node.kind(), || {
                let module = node
                    .child_by_field_name("source")
                    .map(|s| ctx.node_text(&s).trim_matches(['"', '\'', '`']).to_string())?;
                let mut imported = Vec::new();
                for child in find_nodes_by_kind(node, &["import_specifier", "identifier"]) {
                    imported.push(identifier_of(&ctx, child));
                }
                imported.dedup();
                let mut element = ctx.element(&node, module.clone(), ElementKind::Import);
                element.module = Some(module);
                element.imported_names = Some(imported);
                Some(element)
            })
        })
        .collect()
}

fn identifier_of(ctx: &ExtractionContext, node: Node) -> String {
    match node.kind() {
        "import_specifier" => ctx
            .field_text(&node, "name")
            .unwrap_or_else(|| ctx.node_text(&node)),
        _ => ctx.node_text(&node),
    }
}
