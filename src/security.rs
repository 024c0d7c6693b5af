//! Path validation at the trust boundary.
//!
//! Every analyzed path must resolve inside the engine's project root. Rejection
//! reasons are generic constants so a hostile path is never echoed back to the
//! caller.

use crate::error::AnalyzerError;
use std::path::{Component, Path, PathBuf};

pub const REASON_TRAVERSAL: &str = "path escapes the project root";
pub const REASON_OUTSIDE_ROOT: &str = "path resolves outside the project root";
pub const REASON_UNSUPPORTED_FORM: &str = "path form is not supported";

/// Validate `path` against `project_root` and return the resolved absolute path.
///
/// Rejects `..` sequences that climb above the root, Windows drive-letter and
/// UNC forms, and any path whose normalized (and, when it exists, canonical)
/// form is not a descendant of the root.
pub fn validate_file_path(path: &Path, project_root: &Path) -> Result<PathBuf, AnalyzerError> {
    let raw = path.to_string_lossy();

    // Windows drive letters and UNC prefixes are rejected outright on every
    // platform; on Unix they would otherwise pass through as odd relative paths.
    if looks_like_drive_path(&raw) || raw.starts_with("\\\\") {
        return Err(AnalyzerError::PathSecurity(REASON_UNSUPPORTED_FORM));
    }

    let root = lexical_normalize(&absolute(project_root));
    let candidate = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    // Lexical pass first: count `..` pops without touching the filesystem so a
    // traversal attempt is rejected even for files that do not exist.
    let normalized = match pop_components(&candidate) {
        Some(p) => p,
        None => return Err(AnalyzerError::PathSecurity(REASON_TRAVERSAL)),
    };
    if !normalized.starts_with(&root) {
        return Err(AnalyzerError::PathSecurity(REASON_OUTSIDE_ROOT));
    }

    // Canonical pass catches symlinks pointing out of the root. Only possible
    // when the file exists; the lexical pass already covered the rest.
    if let (Ok(canon), Ok(canon_root)) = (normalized.canonicalize(), root.canonicalize()) {
        if !canon.starts_with(&canon_root) {
            return Err(AnalyzerError::PathSecurity(REASON_OUTSIDE_ROOT));
        }
        return Ok(canon);
    }

    Ok(normalized)
}

/// Deterministically strip HTML-significant characters. Pure function; same
/// input always yields the same output, no state anywhere.
pub fn sanitize_input(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect()
}

fn looks_like_drive_path(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Resolve `.` and `..` lexically. Returns `None` if `..` climbs above the
/// filesystem root.
fn pop_components(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                out.pop();
                depth -= 1;
            }
            Component::Normal(seg) => {
                out.push(seg);
                depth += 1;
            }
        }
    }
    Some(out)
}

fn lexical_normalize(path: &Path) -> PathBuf {
    pop_components(path).unwrap_or_else(|| path.to_path_buf())
}
