// Minimal client for a local Ollama server.
//
// Only the non-streaming `/api/generate` call is needed: one prompt in,
// one completed answer out.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Sampling options forwarded to the model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { temperature: 0.1 }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Text-completion client for Ollama.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    options: GenerateOptions,
}

impl OllamaClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &'static str = "mistral";

    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        options: GenerateOptions,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        let path = base_url.path().trim_end_matches('/').to_owned();
        base_url.set_path(&format!("{path}/"));

        Ok(Self {
            http: transport.build_client()?,
            base_url,
            model: model.into(),
            options,
        })
    }

    /// Run one non-streaming completion and return the model's text as-is.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let url = self.base_url.join("api/generate")?;
        debug!(model = %self.model, "POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: self.options,
            })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(Error::Completion {
                message,
                status: status.as_u16(),
            });
        }

        serde_json::from_str::<GenerateResponse>(&body)
            .map(|r| r.response)
            .map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })
    }

    /// Whether the server answers at all (`GET /api/tags`).
    pub async fn is_available(&self) -> bool {
        let Ok(url) = self.base_url.join("api/tags") else {
            return false;
        };
        match self.http.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
