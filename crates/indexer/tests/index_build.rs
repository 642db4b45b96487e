use digest_indexer::{
    sha256_bytes, sha256_file, IndexStats, IndexerConfig, ProjectIndexer, ScanEvent,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn build(root: &Path) -> (digest_indexer::HashIndex, IndexStats, Vec<ScanEvent>) {
    let indexer = ProjectIndexer::new(IndexerConfig::new(root)).unwrap();
    let mut events = Vec::new();
    let (index, stats) = indexer
        .build_with_observer(|event| events.push(event.clone()))
        .unwrap();
    (index, stats, events)
}

#[test]
fn every_distinct_file_gets_one_entry() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let mut expected = Vec::new();
    for i in 0..12usize {
        let rel = format!("level{}/dir{}/file{i}.dat", i % 3, i % 2);
        let content = format!("content number {i}");
        expected.push((sha256_bytes(content.as_bytes()), rel.clone()));
        write(root, &rel, content.as_bytes());
    }

    let (index, stats, events) = build(root);

    assert_eq!(index.len(), 12);
    assert_eq!(stats.files_seen, 12);
    assert_eq!(stats.indexed, 12);
    assert_eq!(stats.collisions, 0);
    assert_eq!(stats.failures, 0);
    assert_eq!(events.len(), 12);

    let canonical_root = std::fs::canonicalize(root).unwrap();
    for (hash, rel) in expected {
        assert_eq!(index.get(&hash), Some(canonical_root.join(rel).as_path()));
    }
}

#[test]
fn identical_content_maps_to_first_file_in_walk_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "00-first/copy.bin", b"shared payload");
    write(root, "10-second.bin", b"shared payload");
    write(root, "20-third/deeper/copy.bin", b"shared payload");

    let (index, stats, events) = build(root);

    let canonical_root = std::fs::canonicalize(root).unwrap();
    let first = canonical_root.join("00-first/copy.bin");
    let hash = sha256_bytes(b"shared payload");

    assert_eq!(index.len(), 1);
    assert_eq!(index.get(&hash), Some(first.as_path()));
    assert_eq!(stats.collisions, 2);

    let collisions: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::Collision {
                existing,
                duplicate,
                ..
            } => Some((existing.clone(), duplicate.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        collisions,
        vec![
            (first.clone(), canonical_root.join("10-second.bin")),
            (first, canonical_root.join("20-third/deeper/copy.bin")),
        ]
    );
}

#[test]
fn lookup_ignores_case_and_surrounding_whitespace() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "doc.txt", b"hello");
    let (index, _, _) = build(tmp.path());

    let hash = sha256_file(&path).unwrap();
    let messy = format!("\t {} \n", hash.to_uppercase());
    assert!(index.get(&hash).is_some());
    assert_eq!(index.get(&messy), index.get(&hash));
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_skipped_and_scan_completes() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "a.txt", b"alpha");
    let locked = write(root, "b.txt", b"bravo");
    write(root, "c.txt", b"charlie");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read regardless of mode bits.
    if std::fs::File::open(&locked).is_ok() {
        return;
    }

    let (index, stats, events) = build(root);

    assert_eq!(index.len(), 2);
    assert_eq!(stats.failures, 1);
    assert!(index.get(&sha256_bytes(b"alpha")).is_some());
    assert!(index.get(&sha256_bytes(b"charlie")).is_some());
    assert!(index.get(&sha256_bytes(b"bravo")).is_none());
    assert!(events.iter().any(|event| matches!(
        event,
        ScanEvent::Failed { path, .. } if path.ends_with("b.txt")
    )));

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn broken_entry_is_skipped_and_remaining_files_are_indexed() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "a.txt", b"alpha");
    std::os::unix::fs::symlink(root.join("vanished.txt"), root.join("b.txt")).unwrap();
    write(root, "c/d.txt", b"charlie");
    write(root, "e.txt", b"echo");

    let (index, stats, events) = build(root);

    assert_eq!(stats.failures, 1);
    assert_eq!(stats.indexed, 3);
    assert_eq!(index.len(), 3);
    for content in [b"alpha".as_slice(), b"charlie".as_slice(), b"echo".as_slice()] {
        assert!(index.get(&sha256_bytes(content)).is_some());
    }
    let failed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::Failed { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![std::fs::canonicalize(root).unwrap().join("b.txt")]);
}

#[test]
fn stats_serialize_for_logging() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "one", b"1");
    let (_, stats, _) = build(tmp.path());

    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["files_seen"], 1);
    assert_eq!(value["indexed"], 1);
    assert_eq!(value["collisions"], 0);
    assert_eq!(value["failures"], 0);
}
