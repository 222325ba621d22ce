// Common test utilities and helpers

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header},
    response::Response,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::services::connectivity::ConnectivityProbe;
use crate::services::llm::{ChatProvider, ChatRequest, ChatStream, LLMError, StreamChunk};
use crate::{AppState, build_router};

/// What the fake provider does when called
pub enum Behavior {
    /// Stream these fragments, then end
    Stream(Vec<&'static str>),
    /// Fail with this provider HTTP status before streaming
    FailWithStatus(u16),
    /// Stream these fragments, then break the stream
    FailMidStream(Vec<&'static str>),
    /// Non-streaming completion text
    Complete(&'static str),
}

/// `ChatProvider` double that records every request it receives
pub struct FakeProvider {
    behavior: Behavior,
    calls: Mutex<Vec<ChatRequest>>,
}

impl FakeProvider {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self { behavior, calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, request: ChatRequest) {
        self.calls.lock().unwrap().push(request);
    }
}

fn chunks(fragments: &[&'static str]) -> Vec<Result<StreamChunk, LLMError>> {
    fragments.iter().map(|f| Ok(StreamChunk::new(*f))).collect()
}

#[async_trait]
impl ChatProvider for FakeProvider {
    async fn stream_chat(
        &self,
        request: ChatRequest,
        _cancel: CancellationToken,
    ) -> Result<ChatStream, LLMError> {
        self.record(request);
        match &self.behavior {
            Behavior::Stream(fragments) => Ok(Box::pin(futures::stream::iter(chunks(fragments)))),
            Behavior::FailWithStatus(status) => {
                Err(LLMError::from_status(*status, "provider said no"))
            },
            Behavior::FailMidStream(fragments) => {
                let mut items = chunks(fragments);
                items.push(Err(LLMError::StreamError("connection reset".to_string())));
                Ok(Box::pin(futures::stream::iter(items)))
            },
            Behavior::Complete(_) => Err(LLMError::ApiError {
                status: None,
                message: "streaming not scripted".to_string(),
            }),
        }
    }

    async fn complete_chat(&self, request: ChatRequest) -> Result<String, LLMError> {
        self.record(request);
        match &self.behavior {
            Behavior::Complete(text) => Ok(text.to_string()),
            Behavior::FailWithStatus(status) => {
                Err(LLMError::from_status(*status, "provider said no"))
            },
            _ => Err(LLMError::EmptyCompletion),
        }
    }
}

pub fn test_app(provider: Arc<FakeProvider>) -> Router {
    test_app_with_probe(provider, ConnectivityProbe::disabled())
}

pub fn test_app_with_probe(provider: Arc<FakeProvider>, probe: ConnectivityProbe) -> Router {
    let state = AppState::new(provider, probe, CancellationToken::new());
    build_router(Arc::new(state))
}

pub async fn post_raw(app: Router, uri: &str, body: &str, locale: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(locale) = locale {
        builder = builder.header(header::ACCEPT_LANGUAGE, locale);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, &body.to_string(), None).await
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Parsed SSE body: content payloads in order plus the number of `[DONE]` markers
pub struct SseBody {
    pub contents: Vec<String>,
    pub done_markers: usize,
}

impl SseBody {
    pub fn parse(body: &str) -> Self {
        let mut contents = Vec::new();
        let mut done_markers = 0;
        for data in body.lines().filter_map(|line| line.strip_prefix("data: ")) {
            if data == "[DONE]" {
                done_markers += 1;
            } else {
                let payload: Value = serde_json::from_str(data).unwrap();
                contents.push(payload["content"].as_str().unwrap().to_string());
            }
        }
        Self { contents, done_markers }
    }

    pub fn text(&self) -> String {
        self.contents.concat()
    }
}
