//! SQL element extraction over data-definition statements.
//!
//! Contributes the Table/View/Index element kinds: `extract_classes` returns
//! the structural containers (tables with their columns, views, indexes) and
//! `extract_functions` returns stored functions and procedures.

use crate::extractors::base::{ExtractionContext, find_first_of_kind, find_nodes_by_kind, guard};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::{Node, Tree};

#[derive(Debug)]
pub struct SqlExtractor;

impl ElementExtractor for SqlExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("sql", source);
        find_nodes_by_kind(
            root,
            &[
                "create_function",
                "create_function_statement",
                "create_procedure",
            ],
        )
        .into_iter()
        .filter_map(|node| {
            guard(node.kind(), || {
                let name = object_name(&ctx, node)?;
                Some(ctx.element(&node, name, ElementKind::Function))
            })
        })
        .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("sql", source);
        let mut elements = Vec::new();
        for node in find_nodes_by_kind(root, &["create_table", "create_view", "create_index"]) {
            let Some(element) = guard(node.kind(), || {
                let name = object_name(&ctx, node)?;
                let kind = match node.kind() {
                    "create_view" => ElementKind::View,
                    "create_index" => ElementKind::Index,
                    _ => ElementKind::Table,
                };
                Some(ctx.element(&node, name, kind))
            }) else {
                continue;
            };
            let is_table = element.kind == ElementKind::Table;
            let table_name = element.name.clone();
            elements.push(element);
            if is_table {
                // Columns ride along as fields qualified by their table.
                for column in find_nodes_by_kind(node, &["column_definition"]) {
                    if let Some(field) = guard(column.kind(), || {
                        let name = find_first_of_kind(column, "identifier")
                            .map(|n| ctx.node_text(&n))?;
                        let mut field = ctx.element(&column, name, ElementKind::Field);
                        field.qualified_name =
                            Some(format!("{}.{}", table_name, field.name));
                        Some(field)
                    }) {
                        elements.push(field);
                    }
                }
            }
        }
        elements
    }

    fn extract_variables(&self, _tree: Option<&Tree>, _source: &str) -> Vec<Element> {
        Vec::new()
    }

    fn extract_imports(&self, _tree: Option<&Tree>, _source: &str) -> Vec<Element> {
        Vec::new()
    }

    fn language_name(&self) -> &'static str {
        "sql"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".sql"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["tables", "views"]
    }
}

fn object_name(ctx: &ExtractionContext, node: Node) -> Option<String> {
    find_first_of_kind(node, "object_reference")
        .map(|n| ctx.node_text(&n))
        .or_else(|| find_first_of_kind(node, "identifier").map(|n| ctx.node_text(&n)))
}
