//! Language detection and grammar lookup tests.

use crate::language::{detect_language, detect_language_from_extension, get_tree_sitter_language};
use std::fs;
use tempfile::TempDir;

#[test]
fn all_registered_languages_have_grammars() {
    for language in crate::registry::PluginRegistry::get_supported_languages() {
        assert!(
            get_tree_sitter_language(language).is_ok(),
            "grammar for '{}' should load",
            language
        );
    }
}

#[test]
fn unsupported_language_fails() {
    assert!(get_tree_sitter_language("cobol").is_err());
    assert!(get_tree_sitter_language("fortran").is_err());
}

#[test]
fn extension_detection() {
    assert_eq!(detect_language_from_extension("rs"), Some("rust"));
    assert_eq!(detect_language_from_extension("ts"), Some("typescript"));
    assert_eq!(detect_language_from_extension("tsx"), Some("tsx"));
    assert_eq!(detect_language_from_extension("py"), Some("python"));
    assert_eq!(detect_language_from_extension("cc"), Some("cpp"));
    assert_eq!(detect_language_from_extension("sql"), Some("sql"));
    assert_eq!(detect_language_from_extension("xyz"), None);
}

#[test]
fn detection_by_path() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("script.py");
    fs::write(&file, "x = 1\n").unwrap();
    assert_eq!(detect_language(&file), Some("python"));
}

#[test]
fn shebang_sniffing_for_extensionless_scripts() {
    let dir = TempDir::new().unwrap();

    let python = dir.path().join("run");
    fs::write(&python, "#!/usr/bin/env python3\nprint('hi')\n").unwrap();
    assert_eq!(detect_language(&python), Some("python"));

    let shell = dir.path().join("setup");
    fs::write(&shell, "#!/bin/bash\necho hi\n").unwrap();
    assert_eq!(detect_language(&shell), Some("bash"));
}

#[test]
fn detection_is_deterministic_for_unchanged_files() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tool");
    fs::write(&file, "#!/usr/bin/env node\n").unwrap();
    let first = detect_language(&file);
    let second = detect_language(&file);
    assert_eq!(first, second);
    assert_eq!(first, Some("javascript"));
}

#[test]
fn unknown_content_stays_unknown() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("data.unknownext");
    fs::write(&file, "no markers here\n").unwrap();
    assert_eq!(detect_language(&file), None);
}
