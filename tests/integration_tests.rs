use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn tfdiff() -> Command {
    let mut cmd = Command::cargo_bin("tfdiff").unwrap();
    cmd.env_remove("TFDIFF_BASE")
        .env_remove("TFDIFF_BASE_DIR")
        .env_remove("TFDIFF_DIR")
        .env_remove("TFDIFF_GLOB")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn changed_targets() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/target"])
        .assert()
        .success()
        .stdout("-target aws_eip.legacy -target aws_instance.web -target aws_s3_bucket.logs ");
}

#[test]
fn no_changes() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/base"])
        .assert()
        .success()
        .stdout("-refresh=false");
}

#[test]
fn no_changes_with_newline() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/base", "-n"])
        .assert()
        .success()
        .stdout("-refresh=false\n");
}

#[test]
fn changed_lines() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/target"])
        .args(&["-o", "lines"])
        .assert()
        .success()
        .stdout("aws_eip.legacy\naws_instance.web\naws_s3_bucket.logs\n");
}

#[test]
fn changed_json() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/target", "-C", "tests/fixtures/base"])
        .args(&["-o", "json"])
        .assert()
        .success()
        .stdout(concat!(
            r#"[{"name":"aws_eip.legacy","change":"added"},"#,
            r#"{"name":"aws_instance.web","change":"modified"},"#,
            r#"{"name":"aws_s3_bucket.logs","change":"removed"}]"#
        ));
}

#[test]
fn glob_from_env() {
    tfdiff()
        .env("TFDIFF_GLOB", "network.tf")
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/target"])
        .assert()
        .success()
        .stdout("-refresh=false");
}

#[test]
fn debug_logging_from_env() {
    tfdiff()
        .env("RUST_LOG", "tfdiff=debug")
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/base"])
        .assert()
        .success()
        .stdout("-refresh=false")
        .stderr(predicate::str::contains("parsed file"))
        .stderr(predicate::str::contains("compared declarations"));
}

#[test]
fn quiet_by_default() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/base", "-C", "tests/fixtures/base"])
        .assert()
        .success()
        .stderr("");
}

#[test]
fn changed_references_are_not_detected() {
    let dir = tempfile::tempdir().unwrap();
    let (base, target) = (dir.path().join("a"), dir.path().join("b"));
    fs::create_dir(&base).unwrap();
    fs::create_dir(&target).unwrap();
    fs::write(base.join("main.tf"), "resource \"t\" \"a\" {\n  ami = var.a\n}\n").unwrap();
    fs::write(target.join("main.tf"), "resource \"t\" \"a\" {\n  ami = var.b\n}\n").unwrap();

    tfdiff()
        .arg("--base-dir")
        .arg(&base)
        .arg("-C")
        .arg(&target)
        .assert()
        .success()
        .stdout("-refresh=false");
}

#[test]
fn parse_error() {
    tfdiff()
        .args(&["--base-dir", "tests/fixtures/broken", "-C", "tests/fixtures/target"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("failed to parse base document"));
}

#[test]
fn missing_base_revision() {
    let dir = tempfile::tempdir().unwrap();

    tfdiff()
        .args(&["-C"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to determine base revision"));
}

#[test]
fn base_conflicts_with_base_dir() {
    tfdiff()
        .args(&["--base", "main", "--base-dir", "tests/fixtures/base"])
        .assert()
        .failure();
}

#[test]
fn generate_completion() {
    tfdiff()
        .args(&["--generate-completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tfdiff"));
}

fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

#[test]
fn compare_against_git_revision() {
    if std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_err()
    {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let stack = dir.path().join("stack");
    fs::create_dir(&stack).unwrap();

    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["checkout", "--quiet", "-b", "main"]);

    for file in ["main.tf", "network.tf"] {
        fs::copy(Path::new("tests/fixtures/base").join(file), stack.join(file)).unwrap();
    }

    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "--quiet", "-m", "base"]);
    git(dir.path(), &["checkout", "--quiet", "-b", "feature"]);

    // Uncommitted working tree changes are part of the target.
    for file in ["main.tf", "network.tf"] {
        fs::copy(Path::new("tests/fixtures/target").join(file), stack.join(file)).unwrap();
    }

    tfdiff()
        .arg("-C")
        .arg(&stack)
        .assert()
        .success()
        .stdout("-target aws_eip.legacy -target aws_instance.web -target aws_s3_bucket.logs ");

    tfdiff()
        .args(&["-b", "feature", "-C"])
        .arg(&stack)
        .assert()
        .success()
        .stdout("-target aws_eip.legacy -target aws_instance.web -target aws_s3_bucket.logs ");

    git(dir.path(), &["commit", "--quiet", "-am", "target"]);

    tfdiff()
        .args(&["-b", "feature", "-C"])
        .arg(&stack)
        .assert()
        .success()
        .stdout("-refresh=false");
}

#[test]
fn new_directory_on_branch() {
    if std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_err()
    {
        return;
    }

    let dir = tempfile::tempdir().unwrap();

    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["checkout", "--quiet", "-b", "main"]);
    fs::write(dir.path().join("root.tf"), "module \"root\" {}\n").unwrap();
    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "--quiet", "-m", "base"]);
    git(dir.path(), &["checkout", "--quiet", "-b", "feature"]);

    let stack = dir.path().join("newstack");
    fs::create_dir(&stack).unwrap();
    fs::write(stack.join("main.tf"), "resource \"t\" \"x\" {}\n").unwrap();

    tfdiff()
        .arg("-C")
        .arg(&stack)
        .assert()
        .success()
        .stdout("-target t.x ");

    tfdiff()
        .args(&["-b", "nope", "-C"])
        .arg(&stack)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load base document"));
}
