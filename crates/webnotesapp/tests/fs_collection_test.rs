use std::fs;
use std::path::Path;
use tempfile::TempDir;
use webnotesapp::commands::helpers::Selection;
use webnotesapp::index::{build_index, content_hash};
use webnotesapp::parser::parse_document;
use webnotesapp::serializer::Serializer;
use webnotesapp::store::{DocumentStore, FsBackend, StorageBackend};

const SAMPLE: &str = "\
# note://reading_list
title: Reading
tags: books

- [Rust book](https://doc.rust-lang.org/book/)

# https://example.com/post
title: A post
author: Ann
date: 2024-01-31
tags: rust,web

First paragraph.

Second paragraph.

# https://example.com:8080/admin
status: 404 Not Found
";

fn setup() -> (TempDir, DocumentStore<FsBackend>) {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::new(FsBackend::new(dir.path()), Serializer::default());
    (dir, store)
}

fn tree(root: &Path) -> Vec<(String, String)> {
    let mut files: Vec<(String, String)> = walk(root)
        .into_iter()
        .map(|p| {
            let rel = p.strip_prefix(root).unwrap().display().to_string();
            (rel, fs::read_to_string(&p).unwrap())
        })
        .collect();
    files.sort();
    files
}

fn walk(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walk(&path));
        } else {
            out.push(path);
        }
    }
    out
}

#[test]
fn test_round_trip_through_disk() {
    let (dir, store) = setup();
    fs::write(dir.path().join("sample.wn"), SAMPLE).unwrap();

    let doc = store.load(Path::new("sample.wn")).unwrap();
    assert_eq!(doc.len(), 3);
    store.save(&doc).unwrap();

    let on_disk = fs::read_to_string(dir.path().join("sample.wn")).unwrap();
    assert_eq!(on_disk, SAMPLE);
    assert_eq!(parse_document("sample.wn", &on_disk).unwrap(), doc);
}

#[test]
fn test_save_leaves_no_tmp_files() {
    let (dir, store) = setup();
    let doc = parse_document("nested/dir/a.wn", "# note://n\n").unwrap();
    store.save(&doc).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path().join("nested/dir"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.wn"]);
}

#[test]
fn test_document_paths_skip_index_and_other_files() {
    let (dir, store) = setup();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::create_dir_all(dir.path().join("wn_index/tags")).unwrap();
    fs::write(dir.path().join("b.wn"), "# note://b\n").unwrap();
    fs::write(dir.path().join("sub/a.wn"), "# note://a\n").unwrap();
    fs::write(dir.path().join("readme.md"), "# hi\n").unwrap();
    fs::write(dir.path().join("wn_index/tags/x.wn"), "# note://x\n").unwrap();

    let paths = store.document_paths().unwrap();
    assert_eq!(
        paths,
        vec![Path::new("b.wn").to_path_buf(), Path::new("sub/a.wn").to_path_buf()]
    );
}

#[test]
fn test_index_rebuild_is_deterministic() {
    let (dir, store) = setup();
    fs::write(dir.path().join("sample.wn"), SAMPLE).unwrap();
    fs::create_dir_all(dir.path().join("more")).unwrap();
    fs::write(
        dir.path().join("more/other.wn"),
        "# https://example.com/other\nauthor: Ann\ntags: web\n",
    )
    .unwrap();

    let summary = build_index(&store).unwrap();
    assert_eq!(summary.documents, 2);
    assert_eq!(summary.hosts, 2);
    assert!(summary.collisions.is_empty());

    let index_root = dir.path().join("wn_index");
    let first = tree(&index_root);
    build_index(&store).unwrap();
    assert_eq!(tree(&index_root), first);

    let host_file = format!("hosts/{}.wn", content_hash("example.com"));
    let (_, host_doc) = first.iter().find(|(p, _)| *p == host_file).unwrap();
    assert!(host_doc.starts_with("# https://example.com/other\n"));
    assert!(host_doc.contains("# https://example.com/post\n"));

    let port_file = format!("hosts/{}.wn", content_hash("example.com:8080"));
    assert!(first.iter().any(|(p, _)| *p == port_file));

    let author_listing = fs::read_to_string(index_root.join("authors/index")).unwrap();
    assert_eq!(author_listing, format!("{}: Ann\n", content_hash("Ann")));
}

#[test]
fn test_index_root_that_is_a_file_fails() {
    let (dir, store) = setup();
    fs::write(dir.path().join("wn_index"), "not a dir").unwrap();
    assert!(build_index(&store).is_err());
    assert!(store.backend().exists(Path::new("wn_index")));
}

#[test]
fn test_selection_default_matches_everything() {
    let (dir, store) = setup();
    fs::write(dir.path().join("sample.wn"), SAMPLE).unwrap();
    let found = webnotesapp::commands::helpers::collect_matches(&store, &Selection::default())
        .unwrap();
    assert_eq!(found.len(), 3);
}
