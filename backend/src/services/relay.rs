//! Stream relay: provider chunks → Server-Sent Events
//!
//! Every non-empty fragment becomes `data: {"content":"..."}` and a complete
//! stream ends with exactly one `data: [DONE]`, including when the upstream
//! ends without output. Upstream failures, and a shutdown that interrupts
//! output already sent, are yielded as `Err` so the transport aborts the body
//! instead of truncating it silently.

use std::convert::Infallible;

use axum::response::{
    IntoResponse, Response,
    sse::{Event, Sse},
};
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::services::llm::{ChatStream, LLMError, StreamChunk};

pub const DONE_SENTINEL: &str = "[DONE]";

fn chunk_event(chunk: &StreamChunk) -> Result<Event, LLMError> {
    Event::default()
        .json_data(chunk)
        .map_err(|e| LLMError::StreamError(format!("failed to encode chunk: {}", e)))
}

fn done_event() -> Event {
    Event::default().data(DONE_SENTINEL)
}

/// Wait for the first upstream item so that a failure before any output can
/// still be answered with a JSON error instead of a broken stream.
pub async fn prime(mut upstream: ChatStream) -> Result<ChatStream, LLMError> {
    match upstream.next().await {
        Some(Err(e)) => Err(e),
        first => Ok(Box::pin(futures::stream::iter(first).chain(upstream))),
    }
}

/// Forward upstream chunks in order. Dropping the returned stream (client
/// disconnect) cancels `cancel`, which releases the provider connection.
pub fn relay(
    mut upstream: ChatStream,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<Event, LLMError>> + Send + 'static {
    async_stream::stream! {
        let _guard = cancel.clone().drop_guard();
        let mut forwarded = 0usize;
        let mut failed = false;

        loop {
            // Outer None: cancelled. The drop guard only fires after the
            // stream is gone, so a cancel seen here comes from shutdown.
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                next = upstream.next() => Some(next),
            };

            let Some(next) = next else {
                tracing::info!("Relay cancelled after {} fragments", forwarded);
                if forwarded > 0 {
                    failed = true;
                    yield Err(LLMError::StreamError("server shutting down".to_string()));
                }
                break;
            };

            match next {
                None => break,
                Some(Ok(chunk)) if chunk.content.is_empty() => continue,
                Some(Ok(chunk)) => match chunk_event(&chunk) {
                    Ok(event) => {
                        forwarded += 1;
                        yield Ok(event);
                    }
                    Err(e) => {
                        failed = true;
                        yield Err(e);
                        break;
                    }
                },
                Some(Err(e)) => {
                    tracing::error!("Provider stream failed after {} fragments: {}", forwarded, e);
                    failed = true;
                    yield Err(e);
                    break;
                }
            }
        }

        if !failed {
            tracing::debug!("Relay finished with {} fragments", forwarded);
            yield Ok(done_event());
        }
    }
}

/// A fixed reply as one SSE payload followed by the sentinel
pub fn canned(text: &'static str) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    let chunk = StreamChunk::new(text);
    let first = chunk_event(&chunk).unwrap_or_else(|_| Event::default().data(text));
    futures::stream::iter([Ok(first), Ok(done_event())])
}

/// Wrap an event stream into an `text/event-stream` response
pub fn sse_response<S, E>(events: S) -> Response
where
    S: Stream<Item = Result<Event, E>> + Send + 'static,
    E: Into<axum::BoxError>,
{
    Sse::new(events).into_response()
}
