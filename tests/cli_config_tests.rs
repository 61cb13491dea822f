//! End-to-end tests for `thynk config` commands.

mod fixtures;
use fixtures::*;

#[test]
fn test_config_show_default() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["config", "show"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("theme_mode"));
    assert!(stdout.contains("api-inference.huggingface.co"));
    assert!(stdout.contains("(not set)"), "API key defaults to unset");
}

#[test]
fn test_config_show_json_schema() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["config", "show", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert!(result["inference"].is_object());
    assert_eq!(result["inference"]["generation_model"], "gpt2");
    assert!(result["storage"].is_object());
    assert!(result["ui"].is_object());
    assert_eq!(result["ui"]["theme_mode"], "Auto");
}

#[test]
fn test_config_set_theme_round_trips() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["config", "set", "--theme", "dark"], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = isolated_command(&["config", "show", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["ui"]["theme_mode"], "Dark");
}

#[test]
fn test_config_set_rejects_unknown_theme() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["config", "set", "--theme", "sepia"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1), "Should fail validation");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown theme mode"));
}

#[test]
fn test_config_set_without_values_fails() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["config", "set"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No configuration values"));
}

#[test]
fn test_config_path_honors_override() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(&["config", "path"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(temp_dir.path().to_str().unwrap()));
    assert!(stdout.trim_end().ends_with("config.toml"));
}

#[test]
fn test_config_set_api_key_is_hidden_in_show() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let output = isolated_command(
        &["config", "set", "--api-key", "hf_secret_key"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let output = isolated_command(&["config", "show"], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(set)"));
    assert!(
        !stdout.contains("hf_secret_key"),
        "Plain-text key must not be printed"
    );
}
