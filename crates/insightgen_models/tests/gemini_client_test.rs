//! Gemini client tests against a mock server.

use insightgen_core::AspectRatio;
use insightgen_error::{GenerationErrorKind, InsightgenErrorKind};
use insightgen_interface::{GenerativeBackend, ImageRequest, TextRequest};
use insightgen_models::GeminiClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key")
        .expect("non-empty key")
        .with_base_url(server.uri())
}

#[test]
fn blank_api_key_is_a_configuration_error() {
    let err = GeminiClient::new("   ").unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn text_call_sends_grounding_and_sampling_settings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": "persona"}]},
            "tools": [{"googleSearch": {}}],
            "generationConfig": {
                "temperature": 0.85,
                "thinkingConfig": {"thinkingBudget": 8192}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"postContent\":\"hi\"}"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "A"}},
                        {"web": {"uri": "https://b.example"}},
                        {"retrievedContext": {}}
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TextRequest::builder()
        .prompt("write a post")
        .system_instruction(Some("persona".to_string()))
        .search_enabled(true)
        .temperature(Some(0.85))
        .reasoning_budget(Some(8192))
        .build()
        .unwrap();

    let response = client_for(&server).generate_text(&request).await.unwrap();

    assert_eq!(response.text(), "{\"postContent\":\"hi\"}");
    assert_eq!(response.citations().len(), 2);
    assert_eq!(response.citations()[0].title.as_deref(), Some("A"));
    assert_eq!(response.citations()[1].title, None);
}

#[tokio::test]
async fn quota_exhaustion_is_tier_required() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let request = TextRequest::builder().prompt("x").build().unwrap();
    let err = client_for(&server)
        .generate_text(&request)
        .await
        .unwrap_err();

    assert!(err.is_tier_required());
}

#[tokio::test]
async fn server_error_is_a_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let request = TextRequest::builder().prompt("x").build().unwrap();
    let err = client_for(&server)
        .generate_text(&request)
        .await
        .unwrap_err();

    match err.kind() {
        InsightgenErrorKind::Generation(e) => assert_eq!(
            e.kind,
            GenerationErrorKind::HttpError {
                status_code: 500,
                message: "upstream exploded".to_string()
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn blocked_prompt_is_an_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let request = TextRequest::builder().prompt("x").build().unwrap();
    let err = client_for(&server)
        .generate_text(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        InsightgenErrorKind::Generation(e) if e.kind == GenerationErrorKind::EmptyResponse
    ));
}

#[tokio::test]
async fn image_call_decodes_inline_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {"imageConfig": {"aspectRatio": "4:3"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here is your image"},
                    {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
                ]}
            }]
        })))
        .mount(&server)
        .await;

    let request = ImageRequest::builder()
        .prompt("an illustration")
        .aspect_ratio(AspectRatio::Landscape)
        .build()
        .unwrap();

    let image = client_for(&server)
        .generate_image(&request)
        .await
        .unwrap()
        .expect("inline image");

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, vec![1, 2, 3]);
    assert_eq!(image.to_data_uri(), "data:image/png;base64,AQID");
}

#[tokio::test]
async fn image_call_without_inline_data_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "I cannot draw that"}]}}]
        })))
        .mount(&server)
        .await;

    let request = ImageRequest::builder()
        .prompt("an illustration")
        .aspect_ratio(AspectRatio::Square)
        .build()
        .unwrap();

    let image = client_for(&server).generate_image(&request).await.unwrap();
    assert!(image.is_none());
}
