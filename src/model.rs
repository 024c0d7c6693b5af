//! Request, result and element model shared by the engine and all plugins.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One analysis request. Immutable once built; consumed by value by
/// [`AnalysisEngine::analyze`](crate::engine::AnalysisEngine::analyze).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// File to analyze, absolute or relative to the engine's project root.
    pub file_path: PathBuf,
    /// Language override. When `None` the engine detects the language itself.
    pub language: Option<String>,
    /// Annotate Function/Method elements with a branch-node complexity count.
    pub include_complexity: bool,
    /// Keep full `raw_text` on elements; when false only the first line is kept.
    pub include_details: bool,
    /// Named queries to run against the parse tree after extraction.
    pub queries: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            language: None,
            include_complexity: false,
            include_details: true,
            queries: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_complexity(mut self, include: bool) -> Self {
        self.include_complexity = include;
        self
    }

    pub fn with_details(mut self, include: bool) -> Self {
        self.include_details = include;
        self
    }

    pub fn with_queries(mut self, queries: Vec<String>) -> Self {
        self.queries = queries;
        self
    }
}

/// Outcome of one analysis. Constructed once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_path: String,
    pub language: String,
    pub line_count: usize,
    /// Extracted elements in document order (stable sort on `start_line`).
    pub elements: Vec<Element>,
    /// Captures per requested query name.
    pub query_results: HashMap<String, Vec<QueryCapture>>,
    pub success: bool,
    pub error_message: Option<String>,
    pub analysis_time_ms: u64,
    pub node_count: usize,
}

impl AnalysisResult {
    /// A failed result for a recoverable analysis error.
    pub fn failure(
        file_path: impl Into<String>,
        language: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            language: language.into(),
            line_count: 0,
            elements: Vec::new(),
            query_results: HashMap::new(),
            success: false,
            error_message: Some(error_message.into()),
            analysis_time_ms: 0,
            node_count: 0,
        }
    }
}

/// Kind of extracted element. Closed set; data-definition languages contribute
/// the Table/View/Index variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Function,
    Method,
    Class,
    Interface,
    Struct,
    Enum,
    Variable,
    Constant,
    Field,
    Import,
    Table,
    View,
    Index,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Function => "function",
            ElementKind::Method => "method",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Struct => "struct",
            ElementKind::Enum => "enum",
            ElementKind::Variable => "variable",
            ElementKind::Constant => "constant",
            ElementKind::Field => "field",
            ElementKind::Import => "import",
            ElementKind::Table => "table",
            ElementKind::View => "view",
            ElementKind::Index => "index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

/// One normalized unit of extracted code structure.
///
/// Flat struct with optional variant fields rather than an enum per kind, so
/// results serialize uniformly and stay equality-comparable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    pub language: String,
    /// 1-based, `start_line <= end_line`, relative to current file content.
    pub start_line: u32,
    pub end_line: u32,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Package/namespace-qualified name where the language has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    /// Source module of an import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Names brought in by an import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_names: Option<Vec<String>>,
    /// Branch-node count, populated only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u32>,
}

/// One capture produced by a named tree query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCapture {
    pub capture_name: String,
    pub node_type: String,
    pub start_line: u32,
    pub end_line: u32,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_defaults() {
        let req = AnalysisRequest::new("src/lib.rs");
        assert!(req.language.is_none());
        assert!(req.include_details);
        assert!(!req.include_complexity);
        assert!(req.queries.is_empty());
    }

    #[test]
    fn element_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ElementKind::Table).unwrap(), "\"table\"");
        assert_eq!(
            serde_json::to_string(&ElementKind::Function).unwrap(),
            "\"function\""
        );
        assert_eq!(ElementKind::View.as_str(), "view");
    }
}
