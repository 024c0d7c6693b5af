//! Shared extraction helpers used by every language plugin.
//!
//! A per-call [`ExtractionContext`] owns the source text and a node-text memo
//! keyed by byte range, scoped strictly to one extraction call so stale text
//! can never leak between files or sessions.

use crate::model::{Element, ElementKind, Visibility};
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;
use tracing::warn;
use tree_sitter::{Node, Tree};

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*").expect("identifier regex"));

/// Node kinds counted as branches for the complexity annotation.
const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "if_expression",
    "elif_clause",
    "for_statement",
    "for_expression",
    "for_in_statement",
    "while_statement",
    "while_expression",
    "match_arm",
    "case_statement",
    "switch_statement",
    "switch_expression",
    "catch_clause",
    "except_clause",
    "conditional_expression",
    "ternary_expression",
];

/// Per-extraction-call context. Never shared across files or calls.
pub struct ExtractionContext<'a> {
    pub language: &'static str,
    pub source: &'a str,
    text_memo: RefCell<HashMap<(usize, usize), String>>,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(language: &'static str, source: &'a str) -> Self {
        Self {
            language,
            source,
            text_memo: RefCell::new(HashMap::new()),
        }
    }

    /// Text of a node, memoized by (start_byte, end_byte) for this call only.
    pub fn node_text(&self, node: &Node) -> String {
        let key = (node.start_byte(), node.end_byte());
        if let Some(text) = self.text_memo.borrow().get(&key) {
            return text.clone();
        }
        let bytes = self.source.as_bytes();
        let text = if key.0 < bytes.len() && key.1 <= bytes.len() {
            String::from_utf8_lossy(&bytes[key.0..key.1]).to_string()
        } else {
            String::new()
        };
        self.text_memo.borrow_mut().insert(key, text.clone());
        text
    }

    /// Build an element spanning `node` with the common fields filled in.
    pub fn element(&self, node: &Node, name: String, kind: ElementKind) -> Element {
        Element {
            name,
            kind,
            language: self.language.to_string(),
            start_line: (node.start_position().row + 1) as u32,
            end_line: (node.end_position().row + 1) as u32,
            raw_text: self.node_text(node),
            visibility: None,
            parameters: None,
            return_type: None,
            qualified_name: None,
            module: None,
            imported_names: None,
            complexity: None,
        }
    }

    pub fn field_text(&self, node: &Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|child| self.node_text(&child))
    }

    /// Best-effort identifier for a node: the `name` field, then the first
    /// identifier child, then a leading-identifier scan of the node text.
    pub fn identifier_name(&self, node: &Node) -> String {
        if let Some(name) = node.child_by_field_name("name") {
            return self.node_text(&name);
        }
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if child.kind().contains("identifier") {
                    return self.node_text(&child);
                }
            }
        }
        let text = self.node_text(node);
        IDENTIFIER_RE
            .find(text.trim())
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    /// Visibility from modifier children, then from leading keywords in text.
    pub fn visibility(&self, node: &Node) -> Option<Visibility> {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                match child.kind() {
                    "public" | "visibility_modifier" => return Some(Visibility::Public),
                    "private" => return Some(Visibility::Private),
                    "protected" => return Some(Visibility::Protected),
                    _ => {}
                }
            }
        }
        let text = self.node_text(node);
        let head = text.lines().next().unwrap_or("");
        if head.contains("public ") {
            Some(Visibility::Public)
        } else if head.contains("private ") {
            Some(Visibility::Private)
        } else if head.contains("protected ") {
            Some(Visibility::Protected)
        } else {
            None
        }
    }
}

/// Collect every descendant (including `node` itself) whose kind is in `kinds`.
pub fn find_nodes_by_kind<'t>(node: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    collect_by_kind(node, kinds, &mut out);
    out
}

fn collect_by_kind<'t>(node: Node<'t>, kinds: &[&str], out: &mut Vec<Node<'t>>) {
    if kinds.contains(&node.kind()) {
        out.push(node);
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_by_kind(child, kinds, out);
        }
    }
}

/// Nearest ancestor of one of the given kinds.
pub fn find_parent_of_kind<'t>(node: &Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if kinds.contains(&parent.kind()) {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// First descendant of the given kind, if any.
pub fn find_first_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    find_nodes_by_kind(node, &[kind]).into_iter().next()
}

/// Run one element's extraction with panic isolation. A construct that blows
/// up is skipped; extraction of the remaining elements continues.
pub fn guard<T>(kind: &str, f: impl FnOnce() -> Option<T>) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(element) => element,
        Err(_) => {
            warn!("skipping {} node: element extraction panicked", kind);
            None
        }
    }
}

/// Split a parenthesized parameter list into trimmed entries.
pub fn split_parameters(raw: &str) -> Vec<String> {
    let inner = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '(' | '[' | '{' | '<' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' | '>' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                let p = current.trim();
                if !p.is_empty() {
                    params.push(p.to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let p = current.trim();
    if !p.is_empty() {
        params.push(p.to_string());
    }
    params
}

/// Annotate Function/Method elements with a branch-node count. One walk over
/// the tree; elements are matched by their exact line span.
pub fn annotate_complexity(tree: &Tree, elements: &mut [Element]) {
    let mut spans: HashMap<(u32, u32), u32> = HashMap::new();
    for element in elements.iter() {
        if matches!(element.kind, ElementKind::Function | ElementKind::Method) {
            spans.insert((element.start_line, element.end_line), 0);
        }
    }
    if spans.is_empty() {
        return;
    }
    count_branches(tree.root_node(), &mut spans);
    for element in elements.iter_mut() {
        if matches!(element.kind, ElementKind::Function | ElementKind::Method) {
            // Baseline of 1 for a branchless body.
            element.complexity = spans
                .get(&(element.start_line, element.end_line))
                .map(|branches| branches + 1);
        }
    }
}

fn count_branches(node: Node, spans: &mut HashMap<(u32, u32), u32>) {
    if BRANCH_KINDS.contains(&node.kind()) {
        let line = (node.start_position().row + 1) as u32;
        for ((start, end), count) in spans.iter_mut() {
            if *start <= line && line <= *end {
                *count += 1;
            }
        }
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            count_branches(child, spans);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_parameters_respects_nesting() {
        let params = split_parameters("(a: Map<String, u32>, b, c: (i32, i32))");
        assert_eq!(params, vec!["a: Map<String, u32>", "b", "c: (i32, i32)"]);
        assert!(split_parameters("()").is_empty());
    }

    #[test]
    fn guard_swallows_panics() {
        let ok: Option<u32> = guard("test", || Some(7));
        assert_eq!(ok, Some(7));
        let bad: Option<u32> = guard("test", || panic!("boom"));
        assert_eq!(bad, None);
    }
}
