//! Graph API client against a mock server.

use insightgen_core::ImageData;
use insightgen_error::{InsightgenErrorKind, PublishErrorKind};
use insightgen_interface::{LoginToken, PublishPlatform};
use insightgen_social::{GraphApiClient, GraphApiSettings, PUBLISH_SCOPES};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GraphApiClient {
    GraphApiClient::new(
        GraphApiSettings::builder()
            .base_url(server.uri())
            .build()
            .unwrap(),
    )
}

fn token() -> LoginToken {
    LoginToken("user-token".to_string())
}

#[tokio::test]
async fn fetches_identity_with_avatar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v19.0/me"))
        .and(query_param("fields", "name,id,picture"))
        .and(query_param("access_token", "user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "42",
            "name": "Ada Lovelace",
            "picture": {"data": {"url": "https://cdn.example/ada.jpg"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = client_for(&server).fetch_identity(&token()).await.unwrap();

    assert_eq!(identity.id(), "42");
    assert_eq!(identity.display_name(), "Ada Lovelace");
    assert_eq!(
        identity.avatar_url().as_deref(),
        Some("https://cdn.example/ada.jpg")
    );
}

#[tokio::test]
async fn lists_pages_with_their_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v19.0/42/accounts"))
        .and(query_param("fields", "name,access_token,id,category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "p1", "name": "InsightGen", "access_token": "pt1", "category": "Software"},
                {"id": "p2", "name": "Blog", "access_token": "pt2", "category": "Blogger"}
            ]
        })))
        .mount(&server)
        .await;

    let targets = client_for(&server)
        .list_targets(&token(), "42")
        .await
        .unwrap();

    assert_eq!(targets.len(), 2);
    assert_eq!(targets[1].access_token(), "pt2");
    assert_eq!(targets[0].category(), "Software");
}

#[tokio::test]
async fn error_body_on_success_status_is_rejected_verbatim() {
    let server = MockServer::start().await;
    let body = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190}}"#;
    Mock::given(method("GET"))
        .and(path("/v19.0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_identity(&token())
        .await
        .unwrap_err();

    assert_eq!(err.publish_reason().as_deref(), Some(body));
}

#[tokio::test]
async fn malformed_success_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v19.0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_identity(&token())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), InsightgenErrorKind::Json(_)));
    assert!(err.publish_reason().is_none());
}

#[tokio::test]
async fn photo_upload_is_multipart_with_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v19.0/p1/photos"))
        .and(body_string_contains("name=\"access_token\""))
        .and(body_string_contains("page-token"))
        .and(body_string_contains("name=\"message\""))
        .and(body_string_contains("Launch day"))
        .and(body_string_contains("name=\"source\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "ph1", "post_id": "p1_99"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let image = ImageData::new("image/png", b"PNG-bytes".to_vec());
    let receipt = client_for(&server)
        .upload_binary("p1", "page-token", &image, "Launch day")
        .await
        .unwrap();

    assert_eq!(receipt.id(), "ph1");
    assert_eq!(receipt.post_id().as_deref(), Some("p1_99"));
}

#[tokio::test]
async fn rejected_upload_keeps_status_and_body() {
    let server = MockServer::start().await;
    let body = r#"{"error":{"message":"(#200) Requires pages_manage_posts","code":200}}"#;
    Mock::given(method("POST"))
        .and(path("/v19.0/p1/photos"))
        .respond_with(ResponseTemplate::new(403).set_body_string(body))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload_binary("p1", "tok", &ImageData::new("image/png", vec![1]), "c")
        .await
        .unwrap_err();

    match err.kind() {
        InsightgenErrorKind::Publish(e) => assert_eq!(
            e.kind,
            PublishErrorKind::Rejected {
                status_code: Some(403),
                reason: body.to_string(),
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn text_post_goes_to_feed_as_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v19.0/p1/feed"))
        .and(body_string_contains("message=Hello+world"))
        .and(body_string_contains("access_token=page-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1_100"})))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .post_text("p1", "page-token", "Hello world")
        .await
        .unwrap();

    assert_eq!(receipt.id(), "p1_100");
    assert_eq!(*receipt.post_id(), None);
}

#[tokio::test]
async fn login_delegates_to_supplied_token() {
    let client = GraphApiClient::new(GraphApiSettings::default());
    client.init(Some("123")).await.unwrap();
    assert!(client.is_ready());
    assert_eq!(client.app_id().as_deref(), Some("123"));

    let err = client.login("123", PUBLISH_SCOPES).await.unwrap_err();
    assert!(err.is_login_cancelled());
    assert!(client.check_login_status("123").await.is_err());

    let client = client.with_user_token("granted");
    let token = client.login("123", PUBLISH_SCOPES).await.unwrap();
    assert_eq!(token.as_str(), "granted");
    assert!(client.check_login_status("123").await.is_ok());
}
