//! End-to-end tests for the `diary` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn diary(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("diary").unwrap();
    cmd.current_dir(workspace.path())
        .env_remove("VIDEO_DIARY_CONFIG")
        .env_remove("RUST_LOG")
        .env("VIDEO_DIARY_STORAGE_DIR", workspace.path().join("store"))
        .env("VIDEO_DIARY_LIBRARY_DIR", workspace.path().join("library"))
        .env("VIDEO_DIARY_WORK_DIR", workspace.path().join("work"));
    cmd
}

#[test]
fn test_window_drag_to_end_of_video() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args([
            "window",
            "--duration",
            "30",
            "--max",
            "5",
            "--track-width",
            "300",
            "--drag",
            "1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("start: 25.00s"))
        .stdout(predicate::str::contains("end: 30.00s"))
        .stdout(predicate::str::contains("drag settled: 25.00s - 30.00s"));
}

#[test]
fn test_window_drag_back_past_start() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args([
            "window",
            "--duration",
            "30",
            "--max",
            "5",
            "--track-width",
            "300",
            "--drag",
            "1000",
            "--drag",
            "-2000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("start: 0.00s"))
        .stdout(predicate::str::contains("end: 5.00s"));
}

#[test]
fn test_window_short_video_spans_whole_track() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args(["window", "--duration", "3", "--max", "5", "--track-width", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("window: 0.00px - 300.00px"))
        .stdout(predicate::str::contains("end: 3.00s"));
}

#[test]
fn test_list_with_empty_catalog() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No clips saved yet"));
}

#[test]
fn test_list_json_with_empty_catalog() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_list_reads_existing_snapshot() {
    let workspace = TempDir::new().unwrap();
    let store = workspace.path().join("store");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(
        store.join("videos.json"),
        r#"[{"id":"1700000000000","name":"Beach","description":"","videoUri":"file:///library/a.mp4","createdAt":"2024-01-01T10:00:00Z","duration":4.5}]"#,
    )
    .unwrap();

    diary(&workspace)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1700000000000"))
        .stdout(predicate::str::contains("Beach"));
}

#[test]
fn test_show_unknown_clip() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args(["show", "--id", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clip with id nope"));
}

#[test]
fn test_remove_unknown_clip() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args(["remove", "--id", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clip with id nope"));
}

#[test]
fn test_save_rejects_reversed_range() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args([
            "save", "--input", "clip.mp4", "--start", "10", "--end", "4", "--name", "Oops",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("End time must be greater than start time"));
}

#[test]
fn test_invalid_log_level() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args(["--log-level", "loud", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_missing_config_file() {
    let workspace = TempDir::new().unwrap();
    diary(&workspace)
        .args(["--config", "absent.toml", "list"])
        .assert()
        .failure();
}
