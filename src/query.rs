//! Named pattern queries over parse trees.
//!
//! Each (language, name) pair maps to an ordered list of candidate pattern
//! sources. Grammar releases rename node kinds, so candidates are tried in
//! fixed order and the first pattern that compiles is cached and reused.
//! Unknown names and exhausted candidates come back as structured errors,
//! never as panics.

use crate::model::QueryCapture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use streaming_iterator::StreamingIterator;
use thiserror::Error;
use tracing::debug;
use tree_sitter::{Query, QueryCursor, Tree};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown query '{name}' for language '{language}'")]
    UnknownQuery { language: String, name: String },
    #[error("no query pattern for '{name}' compiles against the '{language}' grammar")]
    CompileFailed { language: String, name: String },
}

/// Candidate patterns per (language, query name), most current dialect first.
const QUERY_TABLE: &[(&str, &str, &[&str])] = &[
    (
        "python",
        "functions",
        &["(function_definition name: (identifier) @name) @definition"],
    ),
    (
        "python",
        "classes",
        &["(class_definition name: (identifier) @name) @definition"],
    ),
    (
        "python",
        "imports",
        &[
            "[(import_statement) (import_from_statement)] @import",
            "(import_statement) @import",
        ],
    ),
    (
        "javascript",
        "functions",
        &["(function_declaration name: (identifier) @name) @definition"],
    ),
    (
        "javascript",
        "classes",
        &["(class_declaration name: (identifier) @name) @definition"],
    ),
    ("javascript", "imports", &["(import_statement) @import"]),
    (
        "typescript",
        "functions",
        &["(function_declaration name: (identifier) @name) @definition"],
    ),
    (
        "typescript",
        "classes",
        &[
            "[(class_declaration name: (type_identifier) @name) (interface_declaration name: (type_identifier) @name)] @definition",
            "(class_declaration name: (type_identifier) @name) @definition",
        ],
    ),
    ("typescript", "imports", &["(import_statement) @import"]),
    (
        "rust",
        "functions",
        &["(function_item name: (identifier) @name) @definition"],
    ),
    (
        "rust",
        "classes",
        &[
            "[(struct_item name: (type_identifier) @name) (enum_item name: (type_identifier) @name) (trait_item name: (type_identifier) @name)] @definition",
            "(struct_item name: (type_identifier) @name) @definition",
        ],
    ),
    ("rust", "imports", &["(use_declaration) @import"]),
    (
        "go",
        "functions",
        &[
            "[(function_declaration name: (identifier) @name) (method_declaration name: (field_identifier) @name)] @definition",
            "(function_declaration name: (identifier) @name) @definition",
        ],
    ),
    (
        "go",
        "classes",
        &["(type_spec name: (type_identifier) @name) @definition"],
    ),
    ("go", "imports", &["(import_spec) @import"]),
    (
        "java",
        "functions",
        &["(method_declaration name: (identifier) @name) @definition"],
    ),
    (
        "java",
        "classes",
        &["(class_declaration name: (identifier) @name) @definition"],
    ),
    ("java", "imports", &["(import_declaration) @import"]),
    ("sql", "tables", &["(create_table) @definition"]),
    ("sql", "views", &["(create_view) @definition"]),
];

#[derive(Default)]
pub struct QueryExecutor {
    compiled: Mutex<HashMap<(String, String), Arc<Query>>>,
}

impl QueryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query names available for a language.
    pub fn supported_queries(language: &str) -> Vec<&'static str> {
        QUERY_TABLE
            .iter()
            .filter(|(lang, _, _)| *lang == language)
            .map(|(_, name, _)| *name)
            .collect()
    }

    /// Run a named query and return its captures in tree order.
    pub fn execute(
        &self,
        tree: &Tree,
        source: &str,
        language: &str,
        name: &str,
    ) -> Result<Vec<QueryCapture>, QueryError> {
        let query = self.compile(language, name)?;
        let mut cursor = QueryCursor::new();
        let capture_names = query.capture_names();
        let mut captures = Vec::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                captures.push(QueryCapture {
                    capture_name: capture_names[capture.index as usize].to_string(),
                    node_type: node.kind().to_string(),
                    start_line: (node.start_position().row + 1) as u32,
                    end_line: (node.end_position().row + 1) as u32,
                    content: source
                        .get(node.start_byte()..node.end_byte())
                        .unwrap_or_default()
                        .to_string(),
                });
            }
        }
        Ok(captures)
    }

    fn compile(&self, language: &str, name: &str) -> Result<Arc<Query>, QueryError> {
        let key = (language.to_string(), name.to_string());
        {
            let compiled = self
                .compiled
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(query) = compiled.get(&key) {
                return Ok(query.clone());
            }
        }

        let candidates = QUERY_TABLE
            .iter()
            .find(|(lang, n, _)| *lang == language && *n == name)
            .map(|(_, _, patterns)| *patterns)
            .ok_or_else(|| QueryError::UnknownQuery {
                language: language.to_string(),
                name: name.to_string(),
            })?;

        let grammar = crate::language::get_tree_sitter_language(language).map_err(|_| {
            QueryError::CompileFailed {
                language: language.to_string(),
                name: name.to_string(),
            }
        })?;

        // Fixed-order strategy walk: first compiling pattern wins and is cached.
        for pattern in candidates {
            match Query::new(&grammar, pattern) {
                Ok(query) => {
                    let query = Arc::new(query);
                    self.compiled
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .insert(key, query.clone());
                    return Ok(query);
                }
                Err(e) => {
                    debug!(
                        "query '{}' pattern rejected for '{}': {}",
                        name, language, e
                    );
                }
            }
        }
        Err(QueryError::CompileFailed {
            language: language.to_string(),
            name: name.to_string(),
        })
    }
}
