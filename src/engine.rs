// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Client for the local text-inference engine

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::{CuratorError, Result};

/// Narrow interface to the text-inference engine.
///
/// The planning core never depends on this; only the diagnostic layer does.
#[async_trait]
pub trait TextInference: Send + Sync {
    /// Produce a completion for the given prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// HTTP client for an Ollama-style local engine
pub struct EngineClient {
    client: Client,
    base_url: String,
    config: EngineConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct SamplingOptions {
    temperature: f64,
    num_predict: u32,
    top_k: u32,
    top_p: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
}

impl EngineClient {
    /// Create a new engine client
    pub fn new(config: &EngineConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        // Normalize URL
        let base_url = config
            .url
            .trim_end_matches('/')
            .replace("/api/generate", "")
            .replace("/api/chat", "");

        Self {
            client,
            base_url,
            config: config.clone(),
        }
    }

    /// Check if the engine is available
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.base_url);

        self.client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| {
                CuratorError::EngineUnavailable(format!(
                    "Cannot connect to engine at {}: {}",
                    self.base_url, e
                ))
            })?;

        Ok(())
    }

    /// List available models
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await?;

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Check if a specific model is available
    pub async fn model_available(&self, model: &str) -> Result<bool> {
        let models = self.list_models().await?;
        Ok(models
            .iter()
            .any(|m| m.starts_with(model) || m == &format!("{}:latest", model)))
    }

    /// Generate a text completion with the configured sampling options
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: SamplingOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_new_tokens,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
            },
        };

        debug!("Sending request to engine: model={}", self.config.model);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(CuratorError::EngineUnavailable(format!(
                "Engine returned status {}",
                response.status()
            )));
        }

        let result: GenerateResponse = response.json().await?;
        Ok(result.response)
    }

    /// Generate with retry logic
    pub async fn generate_with_retry(&self, prompt: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.retries {
            if attempt > 0 {
                let delay = Duration::from_secs(2u64.pow(attempt - 1));
                warn!("Retrying engine request in {:?} (attempt {})", delay, attempt + 1);
                tokio::time::sleep(delay).await;
            }

            match self.generate(prompt).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| CuratorError::EngineUnavailable("Unknown error".to_string())))
    }

    /// Base URL the client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TextInference for EngineClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_normalized() {
        let mut config = EngineConfig::default();
        config.url = "http://localhost:11434/api/generate/".to_string();
        let client = EngineClient::new(&config);
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn request_carries_sampling_options() {
        let request = GenerateRequest {
            model: "llama3.2:3b".to_string(),
            prompt: "Test prompt".to_string(),
            stream: false,
            options: SamplingOptions {
                temperature: 0.5,
                num_predict: 100,
                top_k: 3,
                top_p: 0.3,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["options"]["temperature"], 0.5);
        assert_eq!(value["options"]["num_predict"], 100);
        assert_eq!(value["options"]["top_k"], 3);
        assert_eq!(value["options"]["top_p"], 0.3);
        assert_eq!(value["stream"], false);
    }
}
