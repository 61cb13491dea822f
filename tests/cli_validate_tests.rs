//! End-to-end tests for `thynk validate`.

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_valid_document() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = write_document(&sample_document(), temp_dir.path());

    let output = isolated_command(
        &["validate", "--input", path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓"), "Output should indicate success");
}

#[test]
fn test_validate_json_output() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = write_document(&sample_document(), temp_dir.path());

    let output = isolated_command(
        &["validate", "--input", path.to_str().unwrap(), "--json"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["valid"], true);
    assert!(
        result["completeness_percent"].is_u64(),
        "Should report completeness"
    );
    assert!(result.get("error").is_none(), "No error when valid");
}

#[test]
fn test_validate_rejects_empty_experience() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut document = sample_document();
    document.experience.clear();
    let path = write_document(&document, temp_dir.path());

    let output = isolated_command(
        &["validate", "--input", path.to_str().unwrap(), "--json"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1), "Should fail validation");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], false);
    assert!(result["error"]
        .as_str()
        .unwrap()
        .contains("Experience list must not be empty"));
}

#[test]
fn test_validate_rejects_malformed_json() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("cv.json");
    std::fs::write(&path, "{not json").unwrap();

    let output = isolated_command(
        &["validate", "--input", path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse"));
}

#[test]
fn test_validate_missing_file_is_io_error() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("missing.json");

    let output = isolated_command(
        &["validate", "--input", path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "Missing file is an I/O error");
}
