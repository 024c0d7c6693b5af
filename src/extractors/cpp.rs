//! C++ element extraction. Reuses the C walks and adds classes and
//! namespace-qualified names.

use crate::extractors::base::{ExtractionContext, find_first_of_kind, find_nodes_by_kind, guard};
use crate::extractors::{ElementExtractor, c, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::Tree;

#[derive(Debug)]
pub struct CppExtractor;

impl ElementExtractor for CppExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("cpp", source);
        find_nodes_by_kind(root, &["function_definition"])
            .into_iter()
            .filter_map(|node| guard(node.kind(), || c::function_element(&ctx, node, "cpp")))
            .collect()
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("cpp", source);
        c::collect_type_specifiers(
            &ctx,
            root,
            &["class_specifier", "struct_specifier", "enum_specifier"],
        )
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("cpp", source);
        c::collect_toplevel_declarations(&ctx, root)
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new("cpp", source);
        let mut elements = c::collect_includes(&ctx, root);
        for node in find_nodes_by_kind(root, &["using_declaration"]) {
            if let Some(element) = guard(node.kind(), || {
                let target = find_first_of_kind(node, "qualified_identifier")
                    .or_else(|| find_first_of_kind(node, "identifier"))
                    .map(|n| ctx.node_text(&n))?;
                let mut element = ctx.element(&node, target.clone(), ElementKind::Import);
                element.module = Some(target);
                Some(element)
            }) {
                elements.push(element);
            }
        }
        elements
    }

    fn language_name(&self) -> &'static str {
        "cpp"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".cpp", ".cc", ".cxx", ".hpp", ".hh"]
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &[]
    }
}
