//! Python element extraction.

use crate::extractors::base::{
    ExtractionContext, find_nodes_by_kind, find_parent_of_kind, guard, split_parameters,
};
use crate::extractors::{ElementExtractor, root_node};
use crate::model::{Element, ElementKind, Visibility};
use tree_sitter::{Node, Tree};

#[derive(Debug)]
pub struct PythonExtractor;

impl ElementExtractor for PythonExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("python", source);
        find_nodes_by_kind(root, &["function_definition"])
            .into_iter()
            .filter_map(|node| guard(node.kind(), || self.function_element(&ctx, node)))
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("python", source);
        find_nodes_by_kind(root, &["class_definition"])
            .into_iter()
            .filter_map(|node| {
                guard(node.kind(), || {
                    let name = ctx.field_text(&node, "name")?;
                    let mut element = ctx.element(&node, name, ElementKind::Class);
                    element.visibility = Some(underscore_visibility(&element.name));
                    Some(element)
                })
            })
            .collect()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("python", source);
        find_nodes_by_kind(root, &["assignment"])
            .into_iter()
            .filter(|node| find_parent_of_kind(node, &["function_definition"]).is_none())
            .filter_map(|node| guard(node.kind(), || self.variable_element(&ctx, node)))
            .collect()
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("python", source);
        find_nodes_by_kind(root, &["import_statement", "import_from_statement"])
            .into_iter()
            .filter_map(|node| guard(node.kind(), || self.import_element(&ctx, node)))
            .collect()
    }

    fn language_name(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".py", ".pyi"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["functions", "classes", "imports"]
    }
}

impl PythonExtractor {
    fn function_element(&self, ctx: &ExtractionContext, node: Node) -> Option<Element> {
        let name = ctx.field_text(&node, "name")?;
        let kind = if find_parent_of_kind(&node, &["class_definition"]).is_some() {
            ElementKind::Method
        } else {
            ElementKind::Function
        };
        let mut element = ctx.element(&node, name, kind);
        element.parameters = ctx
            .field_text(&node, "parameters")
            .map(|raw| split_parameters(&raw));
        element.return_type = ctx.field_text(&node, "return_type");
        element.visibility = Some(underscore_visibility(&element.name));
        Some(element)
    }

    fn variable_element(&self, ctx: &ExtractionContext, node: Node) -> Option<Element> {
        let left = node.child_by_field_name("left")?;
        if left.kind() != "identifier" {
            return None;
        }
        let name = ctx.node_text(&left);
        let kind = if name.chars().all(|c| !c.is_ascii_lowercase()) && name.len() > 1 {
            ElementKind::Constant
        } else if find_parent_of_kind(&node, &["class_definition"]).is_some() {
            ElementKind::Field
        } else {
            ElementKind::Variable
        };
        let mut element = ctx.element(&node, name, kind);
        element.return_type = ctx.field_text(&node, "type");
        element.visibility = Some(underscore_visibility(&element.name));
        Some(element)
    }

    fn import_element(&self, ctx: &ExtractionContext, node: Node) -> Option<Element> {
        let mut imported = Vec::new();
        let mut module = None;
        if node.kind() == "import_from_statement" {
            module = node
                .child_by_field_name("module_name")
                .map(|m| ctx.node_text(&m));
            for i in 0..node.named_child_count() {
                if let Some(child) = node.named_child(i) {
                    if matches!(
                        child.kind(),
                        "dotted_name" | "aliased_import" | "wildcard_import"
                    ) && Some(child) != node.child_by_field_name("module_name")
                    {
                        imported.push(ctx.node_text(&child));
                    }
                }
            }
        } else {
            for i in 0..node.named_child_count() {
                if let Some(child) = node.named_child(i) {
                    if matches!(child.kind(), "dotted_name" | "aliased_import") {
                        let text = ctx.node_text(&child);
                        if module.is_none() {
                            module = Some(text.clone());
                        }
                        imported.push(text);
                    }
                }
            }
        }
        let name = module.clone().or_else(|| imported.first().cloned())?;
        let mut element = ctx.element(&node, name, ElementKind::Import);
        element.module = module;
        element.imported_names = Some(imported);
        Some(element)
    }
}

fn underscore_visibility(name: &str) -> Visibility {
    if name.starts_with('_') {
        Visibility::Private
    } else {
        Visibility::Public
    }
}
