//! Parse cache behavior: hits, stat-based invalidation, single-flight fills.

use crate::cache::ParseResultCache;
use crate::error::AnalyzerError;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn second_read_is_a_hit() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.py");
    fs::write(&file, "def one(): pass\n").unwrap();

    let cache = ParseResultCache::new();
    let (_, _, hit) = cache.get_or_parse(&file, "python").await.unwrap();
    assert!(!hit);
    let (_, _, hit) = cache.get_or_parse(&file, "python").await.unwrap();
    assert!(hit);
}

#[tokio::test]
async fn changed_size_forces_full_reparse() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.py");
    fs::write(&file, "def one(): pass\n").unwrap();

    let cache = ParseResultCache::new();
    let (_, source_a, _) = cache.get_or_parse(&file, "python").await.unwrap();
    assert!(source_a.contains("one"));

    fs::write(&file, "def two(): pass\ndef three(): pass\n").unwrap();
    let (_, source_b, hit) = cache.get_or_parse(&file, "python").await.unwrap();
    assert!(!hit);
    assert!(source_b.contains("two"));
    assert!(!source_b.contains("one"));
}

#[tokio::test]
async fn concurrent_callers_share_one_entry() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.py");
    fs::write(&file, "def one(): pass\n").unwrap();

    let cache = Arc::new(ParseResultCache::new());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = cache.clone();
        let file = file.clone();
        handles.push(tokio::spawn(async move {
            cache.get_or_parse(&file, "python").await.unwrap().0
        }));
    }
    let trees: Vec<_> = futures_join(handles).await;
    // All callers end up on the same cached tree.
    for tree in &trees[1..] {
        assert!(Arc::ptr_eq(&trees[0], tree));
    }
}

#[tokio::test]
async fn cancelled_caller_does_not_lose_the_parse() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.py");
    fs::write(&file, "def one(): pass\n").unwrap();

    let cache = Arc::new(ParseResultCache::new());
    let filler = {
        let cache = cache.clone();
        let file = file.clone();
        tokio::spawn(async move {
            cache.get_or_parse(&file, "python").await.map(|_| ())
        })
    };
    // Give the fill time to dispatch its parse job, then cancel the caller.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    filler.abort();
    let _ = filler.await;
    // The job stores its own result, so the entry landed anyway.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let (_, _, hit) = cache.get_or_parse(&file, "python").await.unwrap();
    assert!(hit);
}

#[tokio::test]
async fn missing_file_is_distinguished() {
    let dir = TempDir::new().unwrap();
    let cache = ParseResultCache::new();
    let err = cache
        .get_or_parse(&dir.path().join("ghost.py"), "python")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::FileNotFound(_)));
}

#[tokio::test]
async fn evict_forces_reparse() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.py");
    fs::write(&file, "def one(): pass\n").unwrap();

    let cache = ParseResultCache::new();
    cache.get_or_parse(&file, "python").await.unwrap();
    cache.evict(&file);
    let (_, _, hit) = cache.get_or_parse(&file, "python").await.unwrap();
    assert!(!hit);
}

async fn futures_join<T>(handles: Vec<tokio::task::JoinHandle<T>>) -> Vec<T> {
    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        out.push(handle.await.unwrap());
    }
    out
}
