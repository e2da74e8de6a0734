//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

/// One `data:` payload of a streaming chat completion.
#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

/// What a single SSE line carried.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Content(String),
    Error(String),
    Done,
    Ignored,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// Lines may be split across network chunks; they are buffered until a
/// newline arrives. An error payload sent mid-stream ends the stream with an
/// error.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Bytes, not text: a multi-byte character may straddle two chunks.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();

                match parse_sse_line(String::from_utf8_lossy(&line).trim()) {
                    SseLine::Content(content) => yield Ok(content),
                    SseLine::Error(message) => {
                        yield Err(anyhow::anyhow!("API error: {message}"));
                        return;
                    }
                    SseLine::Done => return,
                    SseLine::Ignored => {}
                }
            }
        }
    }
}

/// Parses a single trimmed SSE line.
fn parse_sse_line(line: &str) -> SseLine {
    let Some(payload) = line.strip_prefix("data:") else {
        return SseLine::Ignored;
    };
    let payload = payload.trim_start();

    if payload == "[DONE]" {
        return SseLine::Done;
    }

    let Ok(event) = serde_json::from_str::<StreamEvent>(payload) else {
        return SseLine::Ignored;
    };

    if let Some(error) = event.error {
        return SseLine::Error(error.message);
    }

    let content: String = event
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        SseLine::Ignored
    } else {
        SseLine::Content(content)
    }
}
