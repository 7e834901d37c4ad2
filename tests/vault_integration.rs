use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn snip(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("snip").unwrap();
    cmd.env("SNIPSTASH_HOME", home);
    cmd
}

#[test]
fn test_capture_then_list() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "remember this line"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Captured: remember this line"));

    snip(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("1. "))
        .stdout(predicates::str::contains("remember this line"));
}

#[test]
fn test_first_run_suggests_capture() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("No snippets yet"));
}

#[test]
fn test_capture_with_document_records_context() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("page.txt");
    std::fs::write(
        &doc,
        "The quick brown fox jumps over the lazy dog near the river bank.",
    )
    .unwrap();

    snip(home.path())
        .args(["capture", "brown fox"])
        .arg("--from")
        .arg(&doc)
        .args(["--url", "https://example.com/fox"])
        .args(["--title", "Fox Facts"])
        .assert()
        .success();

    snip(home.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Fox Facts"))
        .stdout(predicates::str::contains("https://example.com/fox"))
        .stdout(predicates::str::contains("brown fox"))
        .stdout(predicates::str::contains("[[SNIPPET]]"))
        .stdout(predicates::str::contains("jumps over the lazy dog"));
}

#[test]
fn test_capture_rejects_short_selection() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "ab"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Selection too short"));
}

#[test]
fn test_delete_by_position() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "alpha snippet text"])
        .assert()
        .success();
    snip(home.path())
        .args(["capture", "beta snippet text"])
        .assert()
        .success();

    // Newest first: position 1 is beta
    snip(home.path())
        .args(["rm", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Deleted: beta snippet text"));

    snip(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("alpha snippet text"))
        .stdout(predicates::str::contains("beta snippet text").not());
}

#[test]
fn test_delete_without_yes_skips_prompt_when_piped() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "short lived snippet"])
        .assert()
        .success();

    snip(home.path())
        .args(["rm", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Deleted: short lived snippet"));
}

#[test]
fn test_query_filters_listing() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "rust borrow checker notes"])
        .assert()
        .success();
    snip(home.path())
        .args(["capture", "python decorator notes"])
        .assert()
        .success();

    snip(home.path())
        .args(["ls", "rust"])
        .assert()
        .success()
        .stdout(predicates::str::contains("rust borrow checker"))
        .stdout(predicates::str::contains("python decorator").not());

    snip(home.path())
        .args(["ls", "cobol"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No snippets match 'cobol'"));
}

#[test]
fn test_edit_preserves_original_text() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "the first draft"])
        .assert()
        .success();

    snip(home.path())
        .args(["edit", "1", "--text", "the final wording"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Snippet updated"));

    snip(home.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("the final wording"))
        .stdout(predicates::str::contains("originally: the first draft"));
}

#[test]
fn test_fav_shows_in_listing() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "worth keeping around"])
        .assert()
        .success();

    snip(home.path())
        .args(["fav", "1"])
        .assert()
        .success();

    snip(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("★"));
}

#[test]
fn test_tag_then_filter_by_tag() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "an article about databases"])
        .assert()
        .success();
    snip(home.path())
        .args(["capture", "a recipe for bread"])
        .assert()
        .success();

    snip(home.path())
        .args(["tag", "2", "storage", "b-tree"])
        .assert()
        .success();

    snip(home.path())
        .args(["ls", "b-tree"])
        .assert()
        .success()
        .stdout(predicates::str::contains("databases"))
        .stdout(predicates::str::contains("recipe").not());
}

#[test]
fn test_config_roundtrip() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["config", "quota_bytes", "1024"])
        .assert()
        .success()
        .stdout(predicates::str::contains("quota_bytes set to 1024"));

    snip(home.path())
        .args(["config", "quota_bytes"])
        .assert()
        .success()
        .stdout(predicates::str::contains("1024"));
}

#[test]
fn test_capture_over_quota_fails_cleanly() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["config", "quota_bytes", "50"])
        .assert()
        .success();

    snip(home.path())
        .args(["capture", "this will not fit inside fifty bytes of storage"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Storage quota exceeded"));

    snip(home.path())
        .args(["config", "quota_bytes", "5242880"])
        .assert()
        .success();

    snip(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("No snippets yet"));
}

#[test]
fn test_unknown_selector_reports_error() {
    let home = tempfile::tempdir().unwrap();

    snip(home.path())
        .args(["capture", "only one here"])
        .assert()
        .success();

    snip(home.path())
        .args(["view", "7"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("No snippet at position 7"));
}
