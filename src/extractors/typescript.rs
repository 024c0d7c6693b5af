//! TypeScript/TSX element extraction. Shares the JavaScript walks and adds the
//! TypeScript-only constructs (interfaces, enums, abstract classes).

use crate::extractors::base::{ExtractionContext, find_nodes_by_kind, guard};
use crate::extractors::{ElementExtractor, javascript, root_node};
use crate::model::{Element, ElementKind};
use tree_sitter::Tree;

#[derive(Debug)]
pub struct TypeScriptExtractor {
    language: &'static str,
}

impl TypeScriptExtractor {
    pub fn typescript() -> Self {
        Self {
            language: "typescript",
        }
    }

    pub fn tsx() -> Self {
        Self { language: "tsx" }
    }
}

impl ElementExtractor for TypeScriptExtractor {
    fn extract_functions(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        javascript::collect_functions(self.language, tree, source)
    }

    fn extract_classes(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        let Some(root) = root_node(tree, source) else {
            return Vec::new();
        };
        let ctx = ExtractionContext::new(self.language, source);
        find_nodes_by_kind(
            root,
            &[
                "class_declaration",
                "abstract_class_declaration",
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
                element.visibility = ctx.visibility(&node);
                Some(element)
            })
        })
        .collect()
    }

    fn extract_variables(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        javascript::collect_variables(self.language, tree, source)
    }

    fn extract_imports(&self, tree: Option<&Tree>, source: &str) -> Vec<Element> {
        javascript::collect_imports(self.language, tree, source)
    }

    fn language_name(&self) -> &'static str {
        self.language
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        match self.language {
            "tsx" => &[".tsx"],
            _ => &[".ts"],
        }
    }

    fn supported_queries(&self) -> &'static [&'static str] {
        &["functions", "classes", "imports"]
    }
}
