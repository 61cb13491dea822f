//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thynk::models::{CVDocument, User};

/// Path to the thynk binary
pub fn thynk_bin() -> &'static str {
    env!("CARGO_BIN_EXE_thynk")
}

/// Creates a Command with isolated config and data directories rooted at
/// `home`, so tests never touch the real user profile.
pub fn isolated_command(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(thynk_bin());
    cmd.env("THYNK_CONFIG_DIR", home.join("config"));
    cmd.env("THYNK_DATA_DIR", home.join("data"));
    // An ambient key would defeat the isolation for inference commands
    cmd.env_remove("HUGGINGFACE_API_KEY");
    cmd.args(args);
    cmd
}

/// A default document with deterministic personal details, valid for export.
pub fn sample_document() -> CVDocument {
    let mut document = CVDocument::default();
    document.personal.first_name = "Ada".to_string();
    document.personal.last_name = "Lovelace".to_string();
    document.personal.email = "ada@example.com".to_string();
    document.personal.title = "Analytical Engine Programmer".to_string();
    document
}

/// Writes `document` as `cv.json` under `dir` and returns its path.
pub fn write_document(document: &CVDocument, dir: &Path) -> PathBuf {
    let path = dir.join("cv.json");
    fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}

/// Seeds a raw value into the isolated durable store under `home`.
pub fn seed_storage(home: &Path, key: &str, value: &str) {
    let dir = home.join("data").join("storage");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{key}.json")), value).unwrap();
}

/// Seeds a stored account record, optionally premium.
pub fn seed_user(home: &Path, premium: bool) {
    let mut user = User::new("Ada", "ada@example.com");
    user.is_premium = premium;
    seed_storage(home, "user", &serde_json::to_string(&user).unwrap());
}
