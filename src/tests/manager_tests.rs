//! Singleton registry tests. These touch process-wide state and run serially.

use crate::manager::{self, EngineManager};
use serial_test::serial;
use std::sync::Arc;

#[test]
#[serial]
fn same_root_returns_same_instance() {
    let manager = EngineManager::global();
    manager.reset_instances();
    let a = manager.get_instance(Some("/tmp/project-a"));
    let b = manager.get_instance(Some("/tmp/project-a"));
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
#[serial]
fn different_roots_return_different_instances() {
    let manager = EngineManager::global();
    manager.reset_instances();
    let a = manager.get_instance(Some("/tmp/project-a"));
    let b = manager.get_instance(Some("/tmp/project-b"));
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
#[serial]
fn empty_and_missing_root_share_the_default_instance() {
    let manager = EngineManager::global();
    manager.reset_instances();
    let none = manager.get_instance(None);
    let empty = manager.get_instance(Some(""));
    let blank = manager.get_instance(Some("   "));
    assert!(Arc::ptr_eq(&none, &empty));
    assert!(Arc::ptr_eq(&none, &blank));
}

#[test]
#[serial]
fn trailing_separators_normalize_to_one_key() {
    let manager = EngineManager::global();
    manager.reset_instances();
    let plain = manager.get_instance(Some("/tmp/project-a"));
    let slashed = manager.get_instance(Some("/tmp/project-a/"));
    assert!(Arc::ptr_eq(&plain, &slashed));
}

#[test]
#[serial]
fn concurrent_default_lookups_yield_one_instance() {
    let manager = EngineManager::global();
    manager.reset_instances();

    let mut handles = Vec::new();
    for _ in 0..16 {
        handles.push(std::thread::spawn(|| manager::get_instance(None)));
    }
    let engines: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for engine in &engines[1..] {
        assert!(Arc::ptr_eq(&engines[0], engine));
    }
}

#[test]
#[serial]
fn reset_creates_fresh_instances() {
    let manager = EngineManager::global();
    manager.reset_instances();
    let before = manager.get_instance(Some("/tmp/project-a"));
    manager.reset_instances();
    let after = manager.get_instance(Some("/tmp/project-a"));
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn key_normalization() {
    assert_eq!(EngineManager::normalize_key(None), "default");
    assert_eq!(EngineManager::normalize_key(Some("")), "default");
    assert_eq!(EngineManager::normalize_key(Some("  ")), "default");
    assert_eq!(EngineManager::normalize_key(Some("/a/b/")), "/a/b");
    assert_eq!(EngineManager::normalize_key(Some("/a/b")), "/a/b");
}
