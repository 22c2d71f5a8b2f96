use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One conversational turn on the Gemini wire. Roles are `"user"` and
/// `"model"`; the system context travels separately as `system_instruction`,
/// which carries no role at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Role-less content for the `system_instruction` field.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Structured response envelope the model is asked to fill: plain markdown,
/// but requested as JSON so the response schema keeps the model on format.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NarrativeResponse {
    #[schemars(description = "The full analysis or answer, formatted as markdown")]
    pub markdown: String,
}

impl NarrativeResponse {
    pub fn response_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(NarrativeResponse);
        serde_json::to_value(schema.schema).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            system_instruction: Some(Content::system("context")),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: None,
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("systemInstruction"));
        assert!(json.contains("generationConfig"));
        assert!(json.contains("responseMimeType"));
        assert!(!json.contains("responseSchema"));
    }

    #[test]
    fn test_system_content_carries_no_role() {
        let system = serde_json::to_string(&Content::system("context")).unwrap();
        assert!(!system.contains("role"));

        let user = serde_json::to_string(&Content::user("question")).unwrap();
        assert!(user.contains(r#""role":"user""#));
    }

    #[test]
    fn test_response_parses_candidates() {
        let body = r#"{
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": "hi" } ] } }
            ]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let candidates = parsed.candidates.unwrap();
        match &candidates[0].content.parts[0] {
            Part::Text { text } => assert_eq!(text, "hi"),
        }
    }

    #[test]
    fn test_narrative_schema_lists_markdown_field() {
        let schema = NarrativeResponse::response_schema();
        assert!(schema["properties"]["markdown"].is_object());
    }
}
