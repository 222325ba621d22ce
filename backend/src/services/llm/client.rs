//! OpenAI-compatible chat completion client (DeepSeek, OpenAI, ...)

use std::time::Duration;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::models::{ChatMessage, ChatRequest, ChatStream, LLMError, StreamChunk};
use super::provider::ChatProvider;
use crate::config::ProviderConfig;

/// Marker the provider sends as the last SSE payload
const PROVIDER_DONE_MARKER: &str = "[DONE]";

pub struct OpenAICompatibleClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    response_timeout: Duration,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAICompatibleClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, LLMError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| LLMError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            response_timeout: Duration::from_secs(config.response_timeout_secs),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send the request and wait for response headers. Non-success statuses
    /// are mapped here, before any output has been produced.
    async fn send(&self, request: &ChatRequest, stream: bool) -> Result<reqwest::Response, LLMError> {
        let body = CompletionBody {
            model: &self.model,
            messages: &request.messages,
            stream,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            "Calling provider model={} stream={} messages={}",
            self.model,
            stream,
            request.messages.len()
        );

        let pending = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.response_timeout, pending)
            .await
            .map_err(|_| {
                LLMError::Timeout(format!(
                    "no response within {}s",
                    self.response_timeout.as_secs_f32()
                ))
            })??;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!("Provider returned HTTP {}: {}", status.as_u16(), text);
            return Err(LLMError::from_status(status.as_u16(), text));
        }

        Ok(response)
    }
}

/// Extract the content delta of one provider SSE payload.
/// Role-only or empty deltas yield `None`.
fn parse_stream_payload(data: &str) -> Result<Option<StreamChunk>, LLMError> {
    let event: StreamEvent = serde_json::from_str(data)
        .map_err(|e| LLMError::ParseError(format!("invalid stream payload: {}", e)))?;

    Ok(event
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty())
        .map(StreamChunk::new))
}

#[async_trait]
impl ChatProvider for OpenAICompatibleClient {
    async fn stream_chat(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<ChatStream, LLMError> {
        let response = self.send(&request, true).await?;
        let mut events = Box::pin(response.bytes_stream().eventsource());

        let stream = async_stream::stream! {
            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    next = events.next() => next,
                };

                match next {
                    None => break,
                    Some(Ok(event)) => {
                        if event.data.trim() == PROVIDER_DONE_MARKER {
                            break;
                        }
                        match parse_stream_payload(&event.data) {
                            Ok(Some(chunk)) => yield Ok(chunk),
                            Ok(None) => continue,
                            Err(e) => {
                                yield Err(e);
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        yield Err(LLMError::StreamError(e.to_string()));
                        break;
                    }
                }
            }

            if cancel.is_cancelled() {
                tracing::debug!("Upstream stream cancelled, releasing provider connection");
            }
        };

        Ok(Box::pin(stream))
    }

    async fn complete_chat(&self, request: ChatRequest) -> Result<String, LLMError> {
        let response = self.send(&request, false).await?;
        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(format!("invalid completion body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LLMError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAICompatibleClient {
        let config = ProviderConfig {
            base_url: format!("{}/", server.uri()),
            api_key: "sk-test".to_string(),
            response_timeout_secs: 2,
            ..ProviderConfig::default()
        };
        OpenAICompatibleClient::new(&config).expect("client should build")
    }

    fn sse_body(payloads: &[&str]) -> String {
        payloads.iter().map(|p| format!("data: {}\n\n", p)).collect()
    }

    async fn collect(stream: ChatStream) -> Vec<Result<StreamChunk, LLMError>> {
        stream.collect().await
    }

    #[test]
    fn test_parse_stream_payload() {
        let chunk = parse_stream_payload(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#).unwrap();
        assert_eq!(chunk, Some(StreamChunk::new("Hi")));

        let role_only = parse_stream_payload(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#);
        assert_eq!(role_only.unwrap(), None);

        let usage_only = parse_stream_payload(r#"{"choices":[],"usage":{"total_tokens":3}}"#);
        assert_eq!(usage_only.unwrap(), None);

        assert!(matches!(parse_stream_payload("not json"), Err(LLMError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_stream_chat_forwards_deltas_in_order() {
        let server = MockServer::start().await;
        let body = sse_body(&[
            r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
            r###"{"choices":[{"delta":{"content":"## Subject"}}]}"###,
            r#"{"choices":[{"delta":{"content":"\nHello"}}]}"#,
            "[DONE]",
        ]);

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "stream": true,
                "max_tokens": 2000,
                "messages": [
                    {"role": "system", "content": "system text"},
                    {"role": "user", "content": "user text"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = ChatRequest::new("system text", "user text").temperature(0.7).max_tokens(2000);
        let stream = client
            .stream_chat(request, CancellationToken::new())
            .await
            .ok()
            .expect("stream should open");

        let chunks: Vec<String> = collect(stream)
            .await
            .into_iter()
            .map(|item| item.expect("chunk").content)
            .collect();
        assert_eq!(chunks, vec!["## Subject".to_string(), "\nHello".to_string()]);
    }

    #[tokio::test]
    async fn test_stream_chat_omits_unset_sampling_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(sse_body(&["[DONE]"])),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let stream = client
            .stream_chat(ChatRequest::new("s", "u"), CancellationToken::new())
            .await
            .ok()
            .expect("stream should open");
        assert!(collect(stream).await.is_empty());

        let received = server.received_requests().await.expect("recording enabled");
        let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert!(sent.get("temperature").is_none());
        assert!(sent.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn test_stream_chat_maps_http_status_before_streaming() {
        let cases: [(u16, &str); 5] = [(429, "rate"), (401, "auth"), (403, "auth"), (503, "down"), (400, "api")];
        for (status, kind) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = client_for(&server)
                .stream_chat(ChatRequest::new("s", "u"), CancellationToken::new())
                .await
                .err()
                .expect("should fail");

            let matched = match kind {
                "rate" => matches!(err, LLMError::RateLimited(_)),
                "auth" => matches!(err, LLMError::AuthFailed { .. }),
                "down" => matches!(err, LLMError::ProviderUnavailable { status: 503, .. }),
                _ => matches!(err, LLMError::ApiError { status: Some(400), .. }),
            };
            assert!(matched, "HTTP {} mapped to {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_stream_chat_surfaces_malformed_payload_as_stream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(sse_body(&[
                r#"{"choices":[{"delta":{"content":"partial"}}]}"#,
                "{broken",
            ])))
            .mount(&server)
            .await;

        let stream = client_for(&server)
            .stream_chat(ChatRequest::new("s", "u"), CancellationToken::new())
            .await
            .ok()
            .expect("stream should open");
        let items = collect(stream).await;

        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], Ok(chunk) if chunk.content == "partial"));
        assert!(matches!(&items[1], Err(LLMError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_stream_chat_stops_when_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(sse_body(&[
                r#"{"choices":[{"delta":{"content":"never read"}}]}"#,
            ])))
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let stream = client_for(&server)
            .stream_chat(ChatRequest::new("s", "u"), cancel.clone())
            .await
            .ok()
            .expect("stream should open");
        cancel.cancel();

        assert!(collect(stream).await.is_empty());
    }

    #[tokio::test]
    async fn test_response_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = ProviderConfig {
            base_url: server.uri(),
            api_key: "sk-test".to_string(),
            response_timeout_secs: 1,
            ..ProviderConfig::default()
        };
        let err = OpenAICompatibleClient::new(&config)
            .unwrap()
            .complete_chat(ChatRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_complete_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"stream": false, "max_tokens": 200})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  better text \n"}}]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete_chat(ChatRequest::new("s", "u").max_tokens(200))
            .await
            .unwrap();
        assert_eq!(text, "better text");
    }

    #[tokio::test]
    async fn test_complete_chat_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "   "}}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete_chat(ChatRequest::new("s", "u")).await.unwrap_err();
        assert!(matches!(err, LLMError::EmptyCompletion));
    }
}
