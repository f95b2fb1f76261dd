//! Wire types for the `generateContent` endpoint.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A content part: text or inline binary data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    /// Marks reasoning output that is not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// A turn of content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// Author role; omitted for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-part user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// A role-less instruction block.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// Tool declaration. Only search grounding is used.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Enables Google Search grounding
    pub google_search: GoogleSearch,
}

/// Empty marker object for the search tool.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

/// Reasoning budget hint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Token budget for reasoning
    pub thinking_budget: u32,
}

/// Image output settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect ratio such as `16:9`
    pub aspect_ratio: String,
}

/// Sampling and output settings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Reasoning budget hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
    /// Image output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerateContentRequest {
    /// Conversation turns
    contents: Vec<Content>,
    /// System instruction
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    /// Tools
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    /// Sampling and output settings
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Creates a new builder.
    pub fn builder() -> GenerateContentRequestBuilder {
        GenerateContentRequestBuilder::default()
    }
}

/// A web citation chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebChunk {
    /// Locator
    #[serde(default)]
    pub uri: Option<String>,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
}

/// A grounding chunk; only web chunks are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    /// Web citation
    #[serde(default)]
    pub web: Option<WebChunk>,
}

/// Grounding metadata attached to a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Citation chunks
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
    /// Search grounding metadata
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt, present when it was blocked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Reply of a `generateContent` call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidates; the first one is used
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Prompt feedback
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated non-thought text of the first candidate.
    pub fn text(&self) -> String {
        self.parts()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect()
    }

    /// First inline payload of the first candidate.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|part| part.inline_data.as_ref())
    }

    /// Web chunks of the first candidate, in backend order.
    pub fn web_chunks(&self) -> impl Iterator<Item = &WebChunk> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .into_iter()
            .flat_map(|m| m.grounding_chunks.iter())
            .filter_map(|chunk| chunk.web.as_ref())
    }

    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// Error detail
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// HTTP-equivalent code
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Canonical status such as `RESOURCE_EXHAUSTED`
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_in_camel_case() {
        let request = GenerateContentRequest::builder()
            .contents(vec![Content::user("hello")])
            .system_instruction(Some(Content::instruction("be brief")))
            .tools(vec![Tool {
                google_search: GoogleSearch::default(),
            }])
            .generation_config(Some(GenerationConfig {
                temperature: Some(0.85),
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: 8192,
                }),
                image_config: None,
            }))
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert!(json["tools"][0]["googleSearch"].is_object());
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            8192
        );
        assert!(json["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn response_text_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "planning...", "thought": true},
                        {"text": "Hello "},
                        {"text": "world"}
                    ]
                }
            }]
        }))
        .unwrap();

        assert_eq!(response.text(), "Hello world");
        assert!(response.inline_data().is_none());
    }

    #[test]
    fn web_chunks_tolerate_missing_metadata() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": [{}]})).unwrap();
        assert_eq!(response.web_chunks().count(), 0);
        assert_eq!(response.text(), "");
    }
}
