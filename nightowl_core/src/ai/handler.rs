use crate::ai::dto::{
    GenerateContentRequest, GenerateContentResponse, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL,
};
use async_trait::async_trait;
use reqwest::Client;
use std::env;
use thiserror::Error;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Missing GOOGLE_API_KEY")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error {status}: {body}")]
    Api { status: u16, body: String },
}

/// A text generation backend. Returns `None` when the model produced no text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<Option<String>, ModelError>;
}

/// Where the generation endpoint finds its model. The credential is kept
/// optional so a missing key is reported per request, not at startup.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiSettings {
    pub fn from_env() -> Self {
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            base_url,
            model,
            api_key,
        }
    }

    pub fn client(&self, client: Client) -> Result<GeminiClient, ModelError> {
        let api_key = self.api_key.clone().ok_or(ModelError::MissingApiKey)?;

        Ok(GeminiClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            model: self.model.clone(),
            api_key,
        })
    }
}

impl GeminiClient {
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        log::debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::from(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, body });
        }

        let generation: GenerateContentResponse = response.json().await?;

        Ok(generation.text())
    }
}
