//! External LLM providers.
//!
//! Extraction only needs a single non-streaming completion per paper, so the
//! seam is one async method. Gemini is the provider the pipeline ships with.

use geovocab_core::{Error, LlmSettings, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A model that turns a system instruction and a prompt into reply text.
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

impl<T: CompletionClient> CompletionClient for &T {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        (**self).complete(system, prompt).await
    }
}

/// Gemini `generateContent` client in JSON response mode.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>, temperature: f64) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature,
        }
    }

    /// Build a client from pipeline settings. Fails if no API key is set.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings.api_key()?;
        Ok(Self::new(&settings.model, api_key, settings.temperature))
    }

    /// Point the client at a different endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Request body for one completion.
    pub fn request_body(&self, system: &str, prompt: &str) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.temperature,
                "responseMimeType": "application/json",
            },
        })
    }
}

impl CompletionClient for GeminiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let url = self.endpoint();
        debug!("Requesting completion from {} with model {}", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&self.request_body(system, prompt))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!("API error {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Invalid response body: {}", e)))?;
        reply_text(&body)
    }
}

/// Concatenate the text parts of the first candidate.
///
/// A reply without parts means the prompt was blocked; the block reason is
/// reported when present.
pub fn reply_text(body: &Value) -> Result<String> {
    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .filter(|parts| !parts.is_empty());

    let Some(parts) = parts else {
        let reason = body["promptFeedback"]["blockReason"]
            .as_str()
            .or_else(|| body["candidates"][0]["finishReason"].as_str())
            .unwrap_or("unknown");
        return Err(Error::Extraction(format!(
            "request was blocked (reason: {})",
            reason
        )));
    };

    Ok(parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .concat())
}
