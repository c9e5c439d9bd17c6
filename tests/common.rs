#![allow(dead_code)]
use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A roster command isolated in its own data directory
pub fn roster(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("ROSTER_DATA_DIR", data_dir).env_remove("RUST_LOG");
    cmd
}

/// Initialize a fresh roster with two registered students
pub fn init_with_students() -> TempDir {
    let dir = TempDir::new().unwrap();

    roster(dir.path()).arg("init").assert().success();

    roster(dir.path())
        .args([
            "student",
            "add",
            "Mona Adel",
            "--code",
            "1234",
            "--stage",
            "prep2",
            "--parent-phone",
            "01012345678",
        ])
        .assert()
        .success();

    roster(dir.path())
        .args(["student", "add", "Omar Ali", "--code", "5678", "--stage", "Sec1"])
        .assert()
        .success();

    dir
}
