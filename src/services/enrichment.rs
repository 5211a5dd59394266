//! Movie identification backed by Gemini structured output.
//!
//! The normalized import text goes out as one prompt; the model answers
//! with a JSON object matching the response schema, which is decoded
//! into lenient [`EnrichedMovie`] records.

use crate::clients::GeminiClient;
use crate::config::Config;
use crate::models::EnrichedMovie;
use crate::parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("No Gemini API key configured")]
    MissingApiKey,

    #[error("Gemini request failed: {0}")]
    Request(String),
}

impl From<anyhow::Error> for EnrichmentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Request(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait EnrichmentService: Send + Sync {
    /// Identify movie records in normalized import text.
    ///
    /// `Ok` with an empty list means the model answered but nothing
    /// usable was in it; `Err` is reserved for auth and transport
    /// failures.
    async fn identify_movies(&self, text: &str) -> Result<Vec<EnrichedMovie>, EnrichmentError>;
}

/// Production implementation on top of [`GeminiClient`].
pub struct GeminiEnrichment {
    client: GeminiClient,
}

impl GeminiEnrichment {
    pub fn from_config(config: &Config) -> Result<Self, EnrichmentError> {
        let api_key = config
            .gemini
            .resolved_api_key()
            .ok_or(EnrichmentError::MissingApiKey)?;

        Ok(Self {
            client: GeminiClient::new(&config.gemini, api_key),
        })
    }
}

#[async_trait::async_trait]
impl EnrichmentService for GeminiEnrichment {
    async fn identify_movies(&self, text: &str) -> Result<Vec<EnrichedMovie>, EnrichmentError> {
        let prompt = build_prompt(text);
        let schema = response_schema();

        let payload = self.client.generate_json(&prompt, &schema).await?;

        Ok(decode_movies(payload.as_deref()))
    }
}

fn build_prompt(text: &str) -> String {
    let text = parser::truncate_chars(text, parser::MAX_TEXT_CHARS);

    format!(
        r#"Você é um especialista em curadoria de cinema para o canal "YoriDPA".
Recebi uma lista de mensagens do Telegram que contém filmes.
Cada linha relevante começa com um ID_REF entre colchetes.

SUA TAREFA:
1. Identifique quais mensagens referenciam filmes ou séries.
2. Limpe os títulos: Remova coisas como [DUBLADO], [4K], [720p], @yorifilmes, etc.
3. Crie uma sinopse envolvente em Português do Brasil.
4. Atribua um gênero, ano de lançamento, nota IMDB aproximada (0-10) e duração.
5. Mantenha o ID_REF para vincular ao link correto.
6. Tente encontrar o trailer oficial no YouTube (apenas o ID do vídeo).

TEXTO DO GRUPO:
{text}"#
    )
}

/// Response schema sent with the request. Gemini type names are the
/// uppercase OpenAPI subset.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "movies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "refId": {"type": "STRING"},
                        "title": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "genre": {"type": "STRING"},
                        "rating": {"type": "NUMBER"},
                        "year": {"type": "INTEGER"},
                        "duration": {"type": "STRING"},
                        "trailerUrl": {"type": "STRING"}
                    },
                    "required": ["refId", "title", "description", "genre", "year", "rating"]
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct MoviesPayload {
    movies: Option<Vec<EnrichedMovie>>,
}

/// Decode the model's JSON answer. An absent or malformed payload
/// decodes to an empty list.
fn decode_movies(payload: Option<&str>) -> Vec<EnrichedMovie> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    match serde_json::from_str::<MoviesPayload>(payload.trim()) {
        Ok(decoded) => decoded.movies.unwrap_or_default(),
        Err(error) => {
            warn!("Could not decode the enrichment response: {error}");
            Vec::new()
        }
    }
}
