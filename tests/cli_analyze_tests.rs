//! End-to-end tests for `thynk analyze`.

mod fixtures;
use fixtures::*;

#[test]
fn test_analyze_without_document_fails() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["analyze"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No stored CV document"));
}

#[test]
fn test_analyze_without_api_key_reports_configuration_error() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let input = write_document(&sample_document(), temp_dir.path());

    let output = isolated_command(
        &["analyze", "--input", input.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3), "Missing key is a config error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
}

#[test]
fn test_analyze_rejects_malformed_document() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("cv.json");
    std::fs::write(&path, "{ not json").unwrap();

    let output = isolated_command(
        &["analyze", "--input", path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse"));
}
