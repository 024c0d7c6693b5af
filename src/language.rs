//! Language detection and tree-sitter grammar lookup.
//!
//! Detection is a pure function of (path, leading bytes): extension table
//! first, then a content sniff over the first line for extensionless scripts.
//! Unknown stays unknown; the engine fails fast instead of guessing.

use anyhow::Result;
use std::path::Path;
use tree_sitter::Language;

/// Detect the language id for a file, or `None` when it cannot be determined.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        if let Some(lang) = detect_language_from_extension(ext) {
            return Some(lang);
        }
    }
    sniff_leading_bytes(&read_leading_bytes(path)?)
}

/// Map a file extension (no leading dot) to a language id.
pub fn detect_language_from_extension(ext: &str) -> Option<&'static str> {
    let language = match ext {
        "rs" => "rust",
        "ts" => "typescript",
        "tsx" => "tsx",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "py" | "pyi" => "python",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        _ => return None,
    };
    Some(language)
}

/// Content-sniff fallback over the leading bytes of a file.
fn sniff_leading_bytes(bytes: &[u8]) -> Option<&'static str> {
    let head = String::from_utf8_lossy(bytes);
    let first_line = head.lines().next().unwrap_or("");
    if first_line.starts_with("#!") {
        if first_line.contains("python") {
            return Some("python");
        }
        if first_line.contains("node") {
            return Some("javascript");
        }
        if first_line.contains("ruby") {
            return Some("ruby");
        }
        if first_line.contains("bash") || first_line.contains("/sh") {
            return Some("bash");
        }
    }
    None
}

fn read_leading_bytes(path: &Path) -> Option<Vec<u8>> {
    use std::io::Read;
    let mut file = std::fs::File::open(path).ok()?;
    let mut buf = [0u8; 256];
    let n = file.read(&mut buf).ok()?;
    Some(buf[..n].to_vec())
}

/// Resolve a language id to its compiled tree-sitter grammar.
pub fn get_tree_sitter_language(language: &str) -> Result<Language> {
    match language {
        "rust" => Ok(tree_sitter_rust::LANGUAGE.into()),
        "typescript" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "javascript" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        "go" => Ok(tree_sitter_go::LANGUAGE.into()),
        "java" => Ok(tree_sitter_java::LANGUAGE.into()),
        "c" => Ok(tree_sitter_c::LANGUAGE.into()),
        "cpp" => Ok(tree_sitter_cpp::LANGUAGE.into()),
        "csharp" => Ok(tree_sitter_c_sharp::LANGUAGE.into()),
        "ruby" => Ok(tree_sitter_ruby::LANGUAGE.into()),
        "bash" => Ok(tree_sitter_bash::LANGUAGE.into()),
        "sql" => Ok(tree_sitter_sequel::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!("Unsupported language: {}", language)),
    }
}
