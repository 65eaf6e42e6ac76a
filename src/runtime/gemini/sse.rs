//! Server-Sent Events (SSE) parser for Gemini responses

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use crate::runtime::error::RuntimeError;

use super::types::GenerateContentResponse;

/// Parse a stream of bytes as Gemini SSE events
///
/// Gemini's SSE format uses `data: <json>` lines. This parser:
/// 1. Reads lines from the byte stream
/// 2. Filters for lines starting with "data: "
/// 3. Extracts and parses the JSON payload
/// 4. Returns a stream of parsed responses
pub fn parse_sse_stream(
    byte_stream: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
) -> Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, RuntimeError>> + Send>> {
    // Accumulate raw bytes; a multi-byte character can be split across chunks,
    // so UTF-8 decoding happens per complete line.
    let mut buffer: Vec<u8> = Vec::new();

    let event_stream = byte_stream.flat_map(move |chunk_result| {
        let chunk = match chunk_result {
            Ok(bytes) => bytes,
            Err(e) => {
                return futures::stream::iter(vec![Err(RuntimeError::StreamError(e.to_string()))]);
            }
        };

        buffer.extend_from_slice(&chunk);

        // Process complete lines
        let mut events = Vec::new();
        while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
            let raw_line: Vec<u8> = buffer.drain(..=newline_pos).collect();
            let line = match std::str::from_utf8(&raw_line) {
                Ok(t) => t.trim(),
                Err(e) => {
                    events.push(Err(RuntimeError::StreamError(format!(
                        "Invalid UTF-8 in stream: {}",
                        e
                    ))));
                    continue;
                }
            };

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            // Process data lines
            if let Some(data) = line.strip_prefix("data: ") {
                // Parse the JSON payload
                match serde_json::from_str::<GenerateContentResponse>(data) {
                    Ok(response) => events.push(Ok(response)),
                    Err(e) => {
                        events.push(Err(RuntimeError::SerializationError(format!(
                            "Failed to parse SSE data: {}. Data: {}",
                            e, data
                        ))));
                    }
                }
            }
            // Ignore other line types (event:, id:, etc.)
        }

        // Return all events found in this chunk
        futures::stream::iter(events)
    });

    Box::pin(event_stream)
}
