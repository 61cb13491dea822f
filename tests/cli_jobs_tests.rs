//! End-to-end tests for `thynk jobs`.

mod fixtures;
use fixtures::*;

#[test]
fn test_jobs_lists_all_listings() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["jobs"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Senior Frontend Developer"));
    assert!(stdout.contains("6 jobs found"));
}

#[test]
fn test_jobs_search_filters_results() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["jobs", "--search", "frontend"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Senior Frontend Developer"));
    assert!(!stdout.contains("Marketing Specialist"));
}

#[test]
fn test_jobs_type_filter() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["jobs", "--type", "Part-time", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let listings: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    let list = listings.as_array().expect("Should be an array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Marketing Specialist");
    // Stored blob format is camelCase with a literal "type" key
    assert_eq!(list[0]["type"], "Part-time");
}

#[test]
fn test_jobs_rejects_unknown_location() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["jobs", "--location", "Atlantis"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1), "Should fail validation");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown location"));
    assert!(stderr.contains("All Locations"), "Should list the options");
}

#[test]
fn test_jobs_combined_filters_can_empty_the_list() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(
        &["jobs", "--type", "Part-time", "--search", "frontend", "--json"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let listings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(listings.as_array().unwrap().len(), 0);
}
