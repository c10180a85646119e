// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Curator

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Directory to organize
    #[serde(default = "default_source")]
    pub source: String,

    /// Destination root for organized files
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Path collection settings
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Inference engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// History settings
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CollectorConfig {
    /// Glob patterns excluded from collection
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_engine_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: String,
}

// Default value functions
fn default_source() -> String { "./sample_data".to_string() }
fn default_destination() -> String { "./organized".to_string() }
fn default_engine_url() -> String { "http://localhost:11434".to_string() }
fn default_model() -> String { "llama3.2:3b".to_string() }
fn default_temperature() -> f64 { 0.5 }
fn default_max_new_tokens() -> u32 { 100 }
fn default_top_k() -> u32 { 3 }
fn default_top_p() -> f64 { 0.3 }
fn default_timeout() -> u64 { 120 }
fn default_retries() -> u32 { 3 }
fn default_history_path() -> String { "curator_history.jsonl".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            destination: default_destination(),
            collector: CollectorConfig::default(),
            engine: EngineConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_new_tokens: default_max_new_tokens(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::CuratorError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
