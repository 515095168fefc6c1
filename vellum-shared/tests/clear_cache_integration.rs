//! End-to-end clear-cache scenarios over the real factory and the local
//! drivers. Network backends are left unconfigured, so the factory silently
//! omits them exactly as it would on a deployment without those services.

use std::fs;
use std::path::Path;

use vellum_shared::cache::{
    CacheClearer, CacheFactory, ClearRequest, DriverKind, Target,
};
use vellum_shared::config::{ApcCacheConfig, CacheConfig, FileCacheConfig};
use vellum_shared::{Catalog, MemoryReporter};

fn local_config(file_dir: &Path, apc_dir: &Path) -> CacheConfig {
    CacheConfig {
        file: FileCacheConfig {
            directory: file_dir.to_path_buf(),
        },
        apc: ApcCacheConfig {
            directory: apc_dir.to_path_buf(),
        },
        ..CacheConfig::default()
    }
}

fn seed_item(root: &Path, path: &str, payload: &str) {
    let file = root.join("data").join(path);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, payload).unwrap();
}

fn seed_tag(root: &Path, tag: &str, members: &[&str]) {
    let file = root.join("tags").join(tag);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, members.join("\n")).unwrap();
}

fn item_exists(root: &Path, path: &str) -> bool {
    root.join("data").join(path).exists()
}

#[tokio::test]
async fn default_request_clears_every_available_driver() {
    let file_dir = tempfile::tempdir().unwrap();
    let apc_dir = tempfile::tempdir().unwrap();
    seed_item(file_dir.path(), "module/key", "payload");
    seed_item(apc_dir.path(), "module/key", "payload");

    let clearer = CacheClearer::new(
        CacheFactory::new(local_config(file_dir.path(), apc_dir.path())),
        Catalog::default(),
    );
    let mut reporter = MemoryReporter::new();

    let outcome = clearer
        .run(&ClearRequest::default(), &mut reporter)
        .await
        .unwrap();

    // All eight kinds were offered; the unconfigured network backends are
    // silently absent, and the rest ran in canonical order.
    let attempted: Vec<(DriverKind, bool)> =
        outcome.reports.iter().map(|r| (r.kind, r.cleared)).collect();
    assert_eq!(
        attempted,
        vec![
            (DriverKind::File, true),
            (DriverKind::Static, true),
            (DriverKind::Apc, true),
            (DriverKind::Dummy, true),
        ]
    );

    assert!(!item_exists(file_dir.path(), "module/key"));
    assert!(!item_exists(apc_dir.path(), "module/key"));

    assert_eq!(
        reporter.comments(),
        vec![
            "File cache cleared.",
            "Static cache cleared.",
            "APC cache cleared.",
            "Dummy cache cleared.",
        ]
    );
    assert!(reporter.errors().is_empty());
    assert_eq!(reporter.infos(), vec!["Cache cleared."]);
}

#[tokio::test]
async fn tag_clear_restricted_to_the_file_driver() {
    let file_dir = tempfile::tempdir().unwrap();
    let apc_dir = tempfile::tempdir().unwrap();
    seed_item(file_dir.path(), "local/foo-entry", "payload");
    seed_item(file_dir.path(), "unrelated/entry", "payload");
    seed_tag(file_dir.path(), "local/foo", &["local/foo-entry"]);

    let clearer = CacheClearer::new(
        CacheFactory::new(local_config(file_dir.path(), apc_dir.path())),
        Catalog::default(),
    );
    let mut reporter = MemoryReporter::new();

    let request = ClearRequest {
        targets: vec![Target::Tag("local/foo".to_string())],
        drivers: vec!["file".to_string()],
    };
    let outcome = clearer.run(&request, &mut reporter).await.unwrap();

    assert_eq!(outcome.targets_processed, 1);
    assert!(!item_exists(file_dir.path(), "local/foo-entry"));
    assert!(item_exists(file_dir.path(), "unrelated/entry"));

    assert_eq!(reporter.comments(), vec!["Tag local/foo cleared."]);
    assert_eq!(reporter.infos(), vec!["Cache cleared."]);
}

#[tokio::test]
async fn invalid_driver_token_aborts_before_touching_backends() {
    let file_dir = tempfile::tempdir().unwrap();
    let apc_dir = tempfile::tempdir().unwrap();
    seed_item(file_dir.path(), "module/key", "payload");

    let clearer = CacheClearer::new(
        CacheFactory::new(local_config(file_dir.path(), apc_dir.path())),
        Catalog::default(),
    );
    let mut reporter = MemoryReporter::new();

    let request = ClearRequest {
        targets: Vec::new(),
        drivers: vec!["file".to_string(), "cassandra".to_string()],
    };
    let err = clearer.run(&request, &mut reporter).await.unwrap_err();

    assert!(err.to_string().contains("cassandra"));
    assert!(item_exists(file_dir.path(), "module/key"));
    assert!(reporter.lines.is_empty());
}

#[tokio::test]
async fn clearing_an_already_empty_deployment_is_idempotent() {
    let file_dir = tempfile::tempdir().unwrap();
    let apc_dir = tempfile::tempdir().unwrap();

    let clearer = CacheClearer::new(
        CacheFactory::new(local_config(file_dir.path(), apc_dir.path())),
        Catalog::default(),
    );

    let mut first = MemoryReporter::new();
    let first_outcome = clearer
        .run(&ClearRequest::default(), &mut first)
        .await
        .unwrap();

    let mut second = MemoryReporter::new();
    let second_outcome = clearer
        .run(&ClearRequest::default(), &mut second)
        .await
        .unwrap();

    assert_eq!(first_outcome.reports, second_outcome.reports);
    assert_eq!(first.lines, second.lines);
}
