//! End-to-end tests for `thynk templates`.

mod fixtures;
use fixtures::*;

#[test]
fn test_templates_lists_catalog() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["templates"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("modern"));
    assert!(stdout.contains("executive"));
    assert!(stdout.contains("5 templates available"));
}

#[test]
fn test_templates_json_output() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["templates", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let templates: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    let list = templates.as_array().expect("Should be an array");
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["id"], "modern");

    // Stored blob format is camelCase
    let premium_ids: Vec<&str> = list
        .iter()
        .filter(|t| t["isPremium"] == true)
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(premium_ids, vec!["creative", "executive"]);
}
