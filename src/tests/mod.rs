//! Test tree for the analysis engine core.

pub mod cache_tests;
pub mod extractor_tests;
pub mod language_tests;
pub mod manager_tests;
pub mod security_tests;

use tree_sitter::{Parser, Tree};

/// Parse `source` with the grammar registered for `language`.
pub(crate) fn parse_source(language: &str, source: &str) -> Tree {
    let grammar = crate::language::get_tree_sitter_language(language)
        .unwrap_or_else(|_| panic!("grammar for {} should load", language));
    let mut parser = Parser::new();
    parser
        .set_language(&grammar)
        .expect("grammar should be ABI-compatible");
    parser
        .parse(source.as_bytes(), None)
        .expect("parser should produce a tree")
}
