//! Integration test: validate every payload fixture under `fixtures/payloads/`.
//!
//! Fixture files are named `<schema>.<valid|invalid>.<json|yaml>`. The
//! schema name and the expected verdict come from the file name, so
//! adding a fixture needs no code change here.

use std::path::{Path, PathBuf};

use tenang_cli::validate::{load_document, validate_document};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn fixture_files() -> Vec<PathBuf> {
    let dir = repo_root().join("fixtures").join("payloads");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

/// Split `register.valid.yaml` into `("register", true)`.
fn expectation(path: &Path) -> (String, bool) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let (schema, verdict) = stem
        .rsplit_once('.')
        .unwrap_or_else(|| panic!("fixture name without verdict: {}", path.display()));
    match verdict {
        "valid" => (schema.to_string(), true),
        "invalid" => (schema.to_string(), false),
        other => panic!("unknown verdict '{other}' in {}", path.display()),
    }
}

#[test]
fn fixtures_exist() {
    let files = fixture_files();
    assert!(
        files.len() >= 10,
        "expected >= 10 payload fixtures, found {}",
        files.len()
    );
}

#[test]
fn fixtures_match_their_verdict() {
    let mut mismatches = Vec::new();
    for path in fixture_files() {
        let (schema, expect_valid) = expectation(&path);
        let document = load_document(Some(&path))
            .unwrap_or_else(|e| panic!("cannot load {}: {e:#}", path.display()));
        let outcome = validate_document(&schema, &document)
            .unwrap_or_else(|e| panic!("{}: {e:#}", path.display()));
        if outcome.is_success() != expect_valid {
            mismatches.push(format!("{}: {:?}", path.display(), outcome.issues()));
        }
    }
    assert!(mismatches.is_empty(), "fixture mismatches:\n{}", mismatches.join("\n"));
}

#[test]
fn report_fixture_points_at_description() {
    let path = repo_root().join("fixtures/payloads/createReport.invalid.json");
    let document = load_document(Some(&path)).unwrap();
    let outcome = validate_document("createReport", &document).unwrap();
    assert_eq!(
        outcome.issues()[0].path,
        vec!["description".to_string()]
    );
}

#[test]
fn yaml_pagination_fixture_is_coerced() {
    let path = repo_root().join("fixtures/payloads/pagination.valid.yaml");
    let document = load_document(Some(&path)).unwrap();
    let outcome = validate_document("pagination", &document).unwrap();
    let data = outcome.data().unwrap();
    assert_eq!(data["page"], 2);
    assert_eq!(data["limit"], 20);
}
