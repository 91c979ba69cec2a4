//! Client for the text-generation backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::{AnalyzerError, Result};

/// A text-generation backend
///
/// The orchestrator holds this behind an `Arc`, constructed once at process
/// start, so tests can substitute a scripted fake without touching global
/// state.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends a prompt and returns the backend's raw text, unmodified
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Client for an Ollama-compatible `/api/generate` endpoint
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model_name: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Creates a client from backend settings
    ///
    /// No request timeout is applied unless one is configured; a hung
    /// backend then hangs the request that is waiting on it.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AnalyzerError::Llm(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
        })
    }
}

#[async_trait]
impl ModelGateway for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            "requesting completion from {} with model {}",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({
                "model": self.model_name,
                "prompt": prompt,
                "stream": false,
            }))
            .send()
            .await
            .map_err(|e| AnalyzerError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalyzerError::Llm(format!(
                "model backend returned HTTP {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Llm(format!("invalid backend response: {}", e)))?;

        Ok(body.response)
    }
}
