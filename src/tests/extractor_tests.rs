//! Per-plugin extraction smoke tests over real grammars.

use super::parse_source;
use crate::extractors::{
    ElementExtractor, go::GoExtractor, java::JavaExtractor, javascript::JavaScriptExtractor,
    python::PythonExtractor, rust::RustExtractor, sql::SqlExtractor,
    typescript::TypeScriptExtractor,
};
use crate::model::{ElementKind, Visibility};

#[test]
fn null_tree_and_empty_source_yield_empty_sequences() {
    let extractors: Vec<Box<dyn ElementExtractor>> = vec![
        Box::new(PythonExtractor),
        Box::new(JavaScriptExtractor),
        Box::new(RustExtractor),
        Box::new(SqlExtractor),
    ];
    for extractor in extractors {
        assert!(extractor.extract_functions(None, "").is_empty());
        assert!(extractor.extract_classes(None, "").is_empty());
        assert!(extractor.extract_variables(None, "").is_empty());
        assert!(extractor.extract_imports(None, "").is_empty());

        let tree = parse_source("python", "x = 1\n");
        assert!(extractor.extract_functions(Some(&tree), "").is_empty());
    }
}

#[test]
fn python_methods_and_private_names() {
    let source = "class Greeter:\n    def greet(self):\n        pass\n    def _hidden(self):\n        pass\n";
    let tree = parse_source("python", source);
    let extractor = PythonExtractor;

    let functions = extractor.extract_functions(Some(&tree), source);
    assert_eq!(functions.len(), 2);
    assert!(functions.iter().all(|f| f.kind == ElementKind::Method));
    let hidden = functions.iter().find(|f| f.name == "_hidden").unwrap();
    assert_eq!(hidden.visibility, Some(Visibility::Private));

    let classes = extractor.extract_classes(Some(&tree), source);
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "Greeter");
    assert_eq!(classes[0].start_line, 1);
    assert_eq!(classes[0].end_line, 5);
}

#[test]
fn python_imports_carry_module_and_names() {
    let source = "import os\nfrom pathlib import Path, PurePath\n";
    let tree = parse_source("python", source);
    let imports = PythonExtractor.extract_imports(Some(&tree), source);

    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].module.as_deref(), Some("os"));
    let from_import = &imports[1];
    assert_eq!(from_import.module.as_deref(), Some("pathlib"));
    let names = from_import.imported_names.as_ref().unwrap();
    assert!(names.contains(&"Path".to_string()));
    assert!(names.contains(&"PurePath".to_string()));
}

#[test]
fn javascript_arrow_functions_count_as_functions() {
    let source = "const add = (a, b) => a + b;\nfunction sub(a, b) { return a - b; }\nlet total = 0;\n";
    let tree = parse_source("javascript", source);
    let extractor = JavaScriptExtractor;

    let functions = extractor.extract_functions(Some(&tree), source);
    let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
    assert!(names.contains(&"add"));
    assert!(names.contains(&"sub"));

    let variables = extractor.extract_variables(Some(&tree), source);
    assert_eq!(variables.len(), 1);
    assert_eq!(variables[0].name, "total");
    assert_eq!(variables[0].kind, ElementKind::Variable);
}

#[test]
fn javascript_imports_list_specifiers() {
    let source = "import { readFile, writeFile } from 'fs';\n";
    let tree = parse_source("javascript", source);
    let imports = JavaScriptExtractor.extract_imports(Some(&tree), source);

    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module.as_deref(), Some("fs"));
    let names = imports[0].imported_names.as_ref().unwrap();
    assert!(names.contains(&"readFile".to_string()));
    assert!(names.contains(&"writeFile".to_string()));
}

#[test]
fn typescript_interfaces_and_enums() {
    let source = "interface Shape { area(): number; }\nenum Color { Red, Green }\nclass Circle {}\n";
    let tree = parse_source("typescript", source);
    let classes = TypeScriptExtractor::typescript().extract_classes(Some(&tree), source);

    let kind_of = |name: &str| classes.iter().find(|c| c.name == name).map(|c| c.kind);
    assert_eq!(kind_of("Shape"), Some(ElementKind::Interface));
    assert_eq!(kind_of("Color"), Some(ElementKind::Enum));
    assert_eq!(kind_of("Circle"), Some(ElementKind::Class));
}

#[test]
fn rust_visibility_and_kinds() {
    let source = "pub fn open() {}\nfn hidden() {}\npub struct Conn;\ntrait Driver {}\nconst MAX: u32 = 4;\nuse std::fmt::Debug;\n";
    let tree = parse_source("rust", source);
    let extractor = RustExtractor;

    let functions = extractor.extract_functions(Some(&tree), source);
    let open = functions.iter().find(|f| f.name == "open").unwrap();
    assert_eq!(open.visibility, Some(Visibility::Public));
    let hidden = functions.iter().find(|f| f.name == "hidden").unwrap();
    assert_eq!(hidden.visibility, Some(Visibility::Private));

    let classes = extractor.extract_classes(Some(&tree), source);
    assert!(classes
        .iter()
        .any(|c| c.name == "Conn" && c.kind == ElementKind::Struct));
    assert!(classes
        .iter()
        .any(|c| c.name == "Driver" && c.kind == ElementKind::Interface));

    let constants = extractor.extract_variables(Some(&tree), source);
    assert_eq!(constants.len(), 1);
    assert_eq!(constants[0].name, "MAX");

    let imports = extractor.extract_imports(Some(&tree), source);
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module.as_deref(), Some("std::fmt::Debug"));
}

#[test]
fn go_exported_visibility() {
    let source = "package main\n\nimport \"fmt\"\n\nfunc Public() {}\nfunc private() {}\n\ntype Server struct {}\n";
    let tree = parse_source("go", source);
    let extractor = GoExtractor;

    let functions = extractor.extract_functions(Some(&tree), source);
    let public = functions.iter().find(|f| f.name == "Public").unwrap();
    assert_eq!(public.visibility, Some(Visibility::Public));
    let private = functions.iter().find(|f| f.name == "private").unwrap();
    assert_eq!(private.visibility, Some(Visibility::Private));

    let classes = extractor.extract_classes(Some(&tree), source);
    assert!(classes
        .iter()
        .any(|c| c.name == "Server" && c.kind == ElementKind::Struct));

    let imports = extractor.extract_imports(Some(&tree), source);
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module.as_deref(), Some("fmt"));
}

#[test]
fn java_package_qualifies_classes() {
    let source = "package com.example;\n\nimport java.util.List;\n\npublic class Service {\n    private int count;\n    public void run() {}\n}\n";
    let tree = parse_source("java", source);
    let extractor = JavaExtractor;

    let classes = extractor.extract_classes(Some(&tree), source);
    assert_eq!(classes.len(), 1);
    assert_eq!(
        classes[0].qualified_name.as_deref(),
        Some("com.example.Service")
    );

    let methods = extractor.extract_functions(Some(&tree), source);
    assert!(methods.iter().any(|m| m.name == "run"));

    let fields = extractor.extract_variables(Some(&tree), source);
    assert!(fields.iter().any(|f| f.name == "count"));

    let imports = extractor.extract_imports(Some(&tree), source);
    assert_eq!(imports[0].module.as_deref(), Some("java.util.List"));
}

#[test]
fn sql_tables_views_and_columns() {
    let source = "CREATE TABLE users (id INT, email TEXT);\nCREATE VIEW active AS SELECT id FROM users;\nCREATE INDEX idx_email ON users (email);\n";
    let tree = parse_source("sql", source);
    let extractor = SqlExtractor;

    let elements = extractor.extract_classes(Some(&tree), source);
    assert!(elements
        .iter()
        .any(|e| e.kind == ElementKind::Table && e.name.contains("users")));
    assert!(elements
        .iter()
        .any(|e| e.kind == ElementKind::View && e.name.contains("active")));
    assert!(elements.iter().any(|e| e.kind == ElementKind::Index));

    let columns: Vec<_> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Field)
        .collect();
    assert!(columns.iter().any(|c| c.name == "id"));
    assert!(columns.iter().any(|c| c.name == "email"));
}
