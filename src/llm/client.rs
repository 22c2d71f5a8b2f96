use crate::error::{AnalysisError, Result};
use crate::llm::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, NarrativeResponse,
    Part,
};
use log::debug;
use reqwest::Client;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Resolves the API key from an optional source value.
///
/// Kept as a pure function so the missing-key path is testable without
/// touching the process environment; an absent or blank key is the
/// user-facing [`AnalysisError::MissingApiKey`] condition and never reaches
/// the network.
pub fn resolve_api_key(source: Option<String>) -> Result<String> {
    match source {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(AnalysisError::MissingApiKey),
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Builds a client from `GEMINI_API_KEY`, failing before any connection
    /// is attempted when the key is absent.
    pub fn from_env() -> Result<Self> {
        let key = resolve_api_key(std::env::var(API_KEY_VAR).ok())?;
        Ok(Self::new(key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls `generateContent` with a system instruction and an ordered set
    /// of conversation turns, returning the model's markdown text.
    pub async fn generate(&self, system_instruction: &str, messages: Vec<Content>) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: messages,
            system_instruction: Some(Content::system(system_instruction)),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(NarrativeResponse::response_schema()),
            },
        };

        debug!(
            "submitting {} turns to model {}",
            payload.contents.len(),
            self.model
        );

        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), message));
        }

        let body: GenerateContentResponse = res
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        let part = body
            .candidates
            .ok_or_else(|| AnalysisError::MalformedResponse("no candidates returned".to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::MalformedResponse("empty candidates list".to_string()))?
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::MalformedResponse("no parts in content".to_string()))?;

        let Part::Text { text } = part;

        // The model answers inside the NarrativeResponse envelope; fall back
        // to the raw text if it ignored the schema.
        match serde_json::from_str::<NarrativeResponse>(&text) {
            Ok(envelope) => Ok(envelope.markdown),
            Err(_) => Ok(text),
        }
    }
}

/// Maps a non-success HTTP status to the provider-specific error taxonomy:
/// quota exhaustion and key rejection get their own variants so the caller
/// can show a pointed message.
fn classify_api_error(status: u16, message: String) -> AnalysisError {
    let lowered = message.to_lowercase();
    match status {
        429 => AnalysisError::RateLimited(message),
        400 | 401 | 403 if lowered.contains("api key") || lowered.contains("api_key") => {
            AnalysisError::InvalidApiKey(message)
        }
        _ => AnalysisError::Api { status, message },
    }
}
