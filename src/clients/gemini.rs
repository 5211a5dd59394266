use crate::config::GeminiConfig;
use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Thin client for the Gemini `generateContent` REST endpoint.
///
/// Only structured-output generation is exposed: the caller supplies a
/// prompt plus a response schema and gets back the raw JSON text the
/// model produced.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with multi-part answers joined.
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}

impl GeminiClient {
    /// Creates a new `GeminiClient` with the timeout from the config.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be built (e.g., due to system TLS configuration issues).
    /// This is a programming error or critical system issue that should not be caught.
    #[must_use]
    pub fn new(config: &GeminiConfig, api_key: String) -> Self {
        let timeout = Duration::from_secs(u64::from(config.request_timeout_seconds));
        Self::with_timeout(config, api_key, timeout)
            .expect("Failed to create GeminiClient with configured timeout")
    }

    /// Creates a new `GeminiClient` with a custom timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(
        config: &GeminiConfig,
        api_key: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("YoriFlix/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    /// Runs one `generateContent` call in structured-output mode and
    /// returns the model's JSON text, or `None` when the response
    /// carried no usable candidate.
    ///
    /// Grounding via Google Search stays enabled so the model can fill
    /// in metadata the source text does not spell out.
    pub async fn generate_json(
        &self,
        prompt: &str,
        response_schema: &serde_json::Value,
    ) -> Result<Option<String>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "tools": [{"google_search": {}}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Gemini API error: {} - {}", status, body));
        }

        let response: GenerateContentResponse = response.json().await?;

        Ok(response.first_text())
    }
}
