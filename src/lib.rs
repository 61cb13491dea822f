//! Thynk Library
//!
//! This library provides core functionality for the Thynk application:
//! the CV document model and builder wizard, template catalog, preview
//! renderer and PDF export pipeline, job listings, mocked auth sessions,
//! and the chat assistant with its inference client.

// Module declarations
pub mod app;
pub mod assistant;
pub mod builder;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod inference;
pub mod jobs;
pub mod models;
pub mod plans;
pub mod preview;
pub mod session;
pub mod storage;
pub mod templates;
pub mod tui;
