//! Scripted backend for orchestrator tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use insightgen_core::ImageData;
use insightgen_error::{
    GenerationError, GenerationErrorKind, InsightgenResult, TierRequiredError,
};
use insightgen_interface::{Citation, GenerativeBackend, ImageRequest, TextRequest, TextResponse};

/// How the stub answers text calls.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum TextBehavior {
    /// Reply with text and citations
    Reply(String, Vec<Citation>),
    /// Fail with a generation error
    Fail,
    /// Fail with a tier-required error
    TierRequired,
}

/// How the stub answers image calls.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum ImageBehavior {
    /// Return this image
    Image(ImageData),
    /// Answer without an image
    Empty,
    /// Fail with a generation error
    Fail,
    /// Never complete
    Hang,
}

/// Backend with scripted behaviour and call recording.
pub struct StubBackend {
    text: TextBehavior,
    image: ImageBehavior,
    pub text_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub last_text_request: Mutex<Option<TextRequest>>,
    pub last_image_request: Mutex<Option<ImageRequest>>,
}

#[allow(dead_code)]
impl StubBackend {
    pub fn new(text: TextBehavior, image: ImageBehavior) -> Self {
        Self {
            text,
            image,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            last_text_request: Mutex::new(None),
            last_image_request: Mutex::new(None),
        }
    }

    pub fn replying(text: &str, image: ImageBehavior) -> Self {
        Self::new(TextBehavior::Reply(text.to_string(), Vec::new()), image)
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_text_request
            .lock()
            .unwrap()
            .as_ref()
            .map(|r| r.prompt().clone())
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    async fn generate_text(&self, request: &TextRequest) -> InsightgenResult<TextResponse> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text_request.lock().unwrap() = Some(request.clone());

        match &self.text {
            TextBehavior::Reply(text, citations) => {
                Ok(TextResponse::new(text.clone(), citations.clone()))
            }
            TextBehavior::Fail => Err(GenerationError::new(GenerationErrorKind::HttpError {
                status_code: 500,
                message: "backend unavailable".to_string(),
            })
            .into()),
            TextBehavior::TierRequired => {
                Err(TierRequiredError::new("Requested entity was not found.").into())
            }
        }
    }

    async fn generate_image(&self, request: &ImageRequest) -> InsightgenResult<Option<ImageData>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image_request.lock().unwrap() = Some(request.clone());

        match &self.image {
            ImageBehavior::Image(image) => Ok(Some(image.clone())),
            ImageBehavior::Empty => Ok(None),
            ImageBehavior::Fail => {
                Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into())
            }
            ImageBehavior::Hang => std::future::pending().await,
        }
    }

    fn backend_name(&self) -> &str {
        "stub"
    }
}

/// A well-formed model reply.
#[allow(dead_code)]
pub fn structured_reply(post: &str, hashtags: &[&str]) -> String {
    serde_json::json!({
        "researchSummary": "Found a benchmark in a recent engineering blog.",
        "contentAngle": "Practical",
        "postContent": post,
        "hashtags": hashtags,
    })
    .to_string()
}
