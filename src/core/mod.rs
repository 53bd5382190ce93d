//! Core utilities for sports-intel
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `files`: data directory paths and whole-file JSON persistence
//! - `http`: client construction and upstream error classification

pub mod files;
pub mod http;

// Re-export commonly used items for convenience
pub use files::{collect_json_files, default_data_dir, try_read_to_string, write_string};
pub use http::{build_client, get_json};
