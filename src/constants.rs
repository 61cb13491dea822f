//! Application-wide constants.
//!
//! This module defines constants used throughout the application:
//! naming, durable storage keys, simulated latencies and export metrics.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Thynk";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "thynk";

/// Storage key for the serialized CV document.
pub const STORAGE_KEY_CV_DATA: &str = "cvData";

/// Storage key for the selected template id.
pub const STORAGE_KEY_SELECTED_TEMPLATE: &str = "selectedTemplate";

/// Storage key for the serialized user session record.
pub const STORAGE_KEY_USER: &str = "user";

/// Simulated latency for the mock auth operations (login, register, upgrade).
pub const AUTH_DELAY_MS: u64 = 1000;

/// Simulated typing delay before a chat reply is shown.
pub const CHAT_TYPING_DELAY_MS: u64 = 1000;

/// How long the job-application success flash stays visible.
pub const APPLY_FLASH_MS: u64 = 3000;

/// Maximum length of a chat message accepted from the user.
pub const CHAT_INPUT_LIMIT: usize = 250;

/// Width of the export paint surface in pixels, before density scaling.
pub const EXPORT_SURFACE_WIDTH_PX: u32 = 1000;

/// Pixel density multiplier applied when painting the export surface.
pub const EXPORT_SCALE: u32 = 2;

/// Output page width in millimeters (ISO A4 portrait).
pub const EXPORT_PAGE_WIDTH_MM: f64 = 210.0;

/// Output page height in millimeters (ISO A4 portrait).
pub const EXPORT_PAGE_HEIGHT_MM: f64 = 297.0;
