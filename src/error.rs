// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Curator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Curator operations
pub type Result<T> = std::result::Result<T, CuratorError>;

/// Curator error types
#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Access denied: {0}")]
    Access(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Engine not available: {0}")]
    EngineUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
