use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn oc_find() -> Command {
    Command::new(env!("CARGO_BIN_EXE_oc-find"))
}

fn tree() -> tempfile::TempDir {
    let temp = tempfile::Builder::new()
        .prefix("oc-find-bin-")
        .tempdir()
        .expect("tempdir");
    fs::create_dir_all(temp.path().join("docs/.drafts")).expect("drafts");
    fs::write(temp.path().join("docs/.drafts/plan.md"), b"").expect("plan");
    fs::write(temp.path().join("docs/guide.md"), b"").expect("guide");
    fs::write(temp.path().join("build.sh"), b"").expect("script");
    temp
}

#[test]
fn oc_find_help_lists_usage() {
    oc_find()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage:").and(predicate::str::contains("oc-find")));
}

#[test]
fn oc_find_version_reports_package_version() {
    oc_find()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn oc_find_rejects_unknown_flag() {
    oc_find()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--definitely-not-a-flag"));
}

#[test]
fn oc_find_filters_by_name_and_skips_hidden() {
    let temp = tree();
    oc_find()
        .arg(temp.path())
        .args(["--nohidden", "--name", "*.md", "--color", "never"])
        .assert()
        .success()
        .stdout(
            predicate::str::ends_with("docs/guide.md\n")
                .and(predicate::str::contains("plan.md").not()),
        );
}

#[test]
fn oc_find_reports_missing_roots_and_fails() {
    let temp = tree();
    oc_find()
        .arg(temp.path().join("missing"))
        .arg(temp.path().join("build.sh"))
        .args(["--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::ends_with("build.sh\n"))
        .stderr(predicate::str::contains("missing'"));
}

#[test]
fn oc_find_delete_empties_a_directory_tree() {
    let temp = tree();
    let docs = temp.path().join("docs");
    oc_find().arg(&docs).arg("--delete").assert().success();
    assert!(!docs.exists());
    assert!(temp.path().join("build.sh").exists());
}
