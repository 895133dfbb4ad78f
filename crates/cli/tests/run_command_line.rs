use std::ffi::OsString;
use std::fs;
use std::path::Path;

fn tree() -> tempfile::TempDir {
    let temp = tempfile::Builder::new()
        .prefix("oc-find-cli-")
        .tempdir()
        .expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("src/.cache")).expect("cache dir");
    fs::write(root.join("src/.cache/blob"), b"").expect("blob");
    fs::write(root.join("src/lib.rs"), b"").expect("lib");
    fs::write(root.join("notes.txt"), b"").expect("notes");
    temp
}

fn run(root: &Path, extra: &[&str]) -> (i32, String, String) {
    let mut arguments: Vec<OsString> = vec![cli::PROGRAM_NAME.into(), root.into()];
    arguments.extend(extra.iter().map(OsString::from));
    arguments.extend([OsString::from("--color"), OsString::from("never")]);

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = cli::run(arguments, &mut stdout, &mut stderr);
    (
        status,
        String::from_utf8(stdout).expect("utf8 stdout"),
        String::from_utf8(stderr).expect("utf8 stderr"),
    )
}

fn relative(output: &str, root: &Path) -> Vec<String> {
    output
        .lines()
        .map(|line| {
            Path::new(line)
                .strip_prefix(root)
                .expect("below root")
                .display()
                .to_string()
        })
        .collect()
}

#[test]
fn prints_the_whole_tree_by_default() {
    let temp = tree();
    let (status, stdout, stderr) = run(temp.path(), &[]);
    assert_eq!(status, 0, "{stderr}");
    assert_eq!(
        relative(&stdout, temp.path()),
        ["", "notes.txt", "src", "src/.cache", "src/.cache/blob", "src/lib.rs"]
    );
}

#[test]
fn nohidden_and_type_filter_files() {
    let temp = tree();
    let (status, stdout, _) = run(temp.path(), &["--nohidden", "--type", "f"]);
    assert_eq!(status, 0);
    assert_eq!(relative(&stdout, temp.path()), ["notes.txt", "src/lib.rs"]);
}

#[test]
fn print0_separates_with_nul() {
    let temp = tree();
    let (_, stdout, _) = run(temp.path(), &["--name", "*.txt", "--print0"]);
    assert!(stdout.ends_with("notes.txt\0"));
    assert!(!stdout.contains('\n'));
}

#[test]
fn quit_stops_after_the_first_match() {
    let temp = tree();
    let (status, stdout, _) = run(temp.path(), &["--type", "f", "--print", "--quit"]);
    assert_eq!(status, 0);
    assert_eq!(relative(&stdout, temp.path()), ["notes.txt"]);
}

#[test]
fn delete_removes_matching_entries() {
    let temp = tree();
    let (status, stdout, stderr) = run(temp.path(), &["--name", "*.rs", "--delete"]);
    assert_eq!(status, 0, "{stderr}");
    assert!(stdout.is_empty());
    assert!(!temp.path().join("src/lib.rs").exists());
    assert!(temp.path().join("notes.txt").exists());
}

#[test]
fn missing_root_sets_failure_status() {
    let temp = tree();
    let (status, stdout, stderr) = run(&temp.path().join("absent"), &[]);
    assert_eq!(status, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("absent'"), "{stderr}");
}
