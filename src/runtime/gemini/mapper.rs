//! Mapping between abstraction types and Gemini types

use crate::runtime::types::{
    Content, FinishReason, GenerateRequest, Part, Role, StreamEvent, UsageMetadata,
};
use crate::runtime::config::GenerationConfig;

use super::types as wire;

/// Convert our abstraction request to Gemini's request format
pub fn to_gemini_request(request: GenerateRequest) -> wire::GenerateContentRequest {
    wire::GenerateContentRequest {
        contents: request.contents.into_iter().map(to_gemini_content).collect(),
        system_instruction: request.system_instruction.map(|s| wire::SystemInstruction {
            parts: vec![wire::Part::Text { text: s }],
        }),
        generation_config: to_gemini_generation_config(request.config),
    }
}

/// Convert a conversation turn to Gemini's content format
fn to_gemini_content(content: Content) -> wire::Content {
    let role = match content.role {
        Role::User => "user".to_string(),
        Role::Model => "model".to_string(),
    };

    let parts = content
        .parts
        .into_iter()
        .map(|part| match part {
            Part::Text { text } => wire::Part::Text { text },
        })
        .collect();

    wire::Content { role, parts }
}

/// Convert generation config to Gemini's format
///
/// Returns `None` when no parameter is set so the request omits the
/// `generationConfig` field entirely and server defaults apply.
fn to_gemini_generation_config(config: GenerationConfig) -> Option<wire::GeminiGenerationConfig> {
    if config.is_empty() {
        return None;
    }
    Some(wire::GeminiGenerationConfig {
        max_output_tokens: config.max_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
    })
}

/// Convert a Gemini response chunk to our abstraction's stream events
pub fn from_gemini_response(response: wire::GenerateContentResponse) -> Vec<StreamEvent> {
    let mut events = Vec::new();

    let Some(candidate) = response.candidates.first() else {
        return events;
    };

    // Process each part in the content
    if let Some(content) = &candidate.content {
        for part in &content.parts {
            match part {
                wire::Part::Text { text } if !text.is_empty() => {
                    events.push(StreamEvent::TextDelta { text: text.clone() });
                }
                // Empty text and non-text parts carry nothing to surface
                _ => {}
            }
        }
    }

    // Handle finish reason and usage metadata
    if let Some(finish_reason_str) = &candidate.finish_reason {
        let finish_reason = map_finish_reason(finish_reason_str);

        // Total can exceed input + output when the model spends thinking tokens,
        // so take the reported counts verbatim.
        let usage = match &response.usage_metadata {
            Some(usage) => UsageMetadata {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
            None => UsageMetadata {
                input_tokens: 0,
                output_tokens: 0,
                total_tokens: 0,
            },
        };

        events.push(StreamEvent::MessageEnd {
            finish_reason,
            usage,
        });
    }

    events
}

/// Map Gemini's finish reason to our abstraction
fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        "RECITATION" => FinishReason::Other("Recitation".to_string()),
        other => FinishReason::Other(other.to_string()),
    }
}

/// Helper to create initial message start event
pub fn create_message_start(message_id: String) -> StreamEvent {
    StreamEvent::MessageStart { id: message_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_gemini_content_user() {
        let content = to_gemini_content(Content::user("Hello"));
        assert_eq!(content.role, "user");
        assert_eq!(content.parts.len(), 1);
        match &content.parts[0] {
            wire::Part::Text { text } => assert_eq!(text, "Hello"),
            _ => panic!("Expected text part"),
        }
    }

    #[test]
    fn test_to_gemini_content_model() {
        let content = to_gemini_content(Content::model("Hi there"));
        assert_eq!(content.role, "model");
    }

    #[test]
    fn test_to_gemini_generation_config() {
        let config = GenerationConfig::default()
            .with_max_tokens(2048)
            .with_temperature(0.7);
        let gemini_config = to_gemini_generation_config(config).unwrap();
        assert_eq!(gemini_config.max_output_tokens, Some(2048));
        assert_eq!(gemini_config.temperature, Some(0.7));
        assert_eq!(gemini_config.top_p, None);
    }

    #[test]
    fn test_empty_generation_config_omitted() {
        assert!(to_gemini_generation_config(GenerationConfig::default()).is_none());
    }

    #[test]
    fn test_map_finish_reason() {
        assert_eq!(map_finish_reason("STOP"), FinishReason::Stop);
        assert_eq!(map_finish_reason("MAX_TOKENS"), FinishReason::MaxTokens);
        assert_eq!(map_finish_reason("SAFETY"), FinishReason::Safety);
        assert_eq!(
            map_finish_reason("RECITATION"),
            FinishReason::Other("Recitation".to_string())
        );
        assert_eq!(
            map_finish_reason("UNKNOWN"),
            FinishReason::Other("UNKNOWN".to_string())
        );
    }

    #[test]
    fn test_from_gemini_response_text() {
        let response = wire::GenerateContentResponse {
            candidates: vec![wire::Candidate {
                content: Some(wire::Content {
                    role: "model".to_string(),
                    parts: vec![wire::Part::Text {
                        text: "Hello!".to_string(),
                    }],
                }),
                finish_reason: None,
            }],
            usage_metadata: None,
        };

        let events = from_gemini_response(response);
        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamEvent::TextDelta { text } => assert_eq!(text, "Hello!"),
            _ => panic!("Expected text delta"),
        }
    }

    #[test]
    fn test_from_gemini_response_with_finish() {
        let response = wire::GenerateContentResponse {
            candidates: vec![wire::Candidate {
                content: Some(wire::Content {
                    role: "model".to_string(),
                    parts: vec![wire::Part::Text {
                        text: "Done".to_string(),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            usage_metadata: Some(wire::UsageMetadata {
                prompt_token_count: 10,
                candidates_token_count: 5,
                total_token_count: 15,
            }),
        };

        let events = from_gemini_response(response);
        assert_eq!(events.len(), 2); // Delta + MessageEnd
        match &events[1] {
            StreamEvent::MessageEnd {
                finish_reason,
                usage,
            } => {
                assert_eq!(*finish_reason, FinishReason::Stop);
                assert_eq!(usage.total_tokens, 15);
            }
            _ => panic!("Expected message end"),
        }
    }

    #[test]
    fn test_from_gemini_response_finish_without_content() {
        let response = wire::GenerateContentResponse {
            candidates: vec![wire::Candidate {
                content: None,
                finish_reason: Some("SAFETY".to_string()),
            }],
            usage_metadata: None,
        };

        let events = from_gemini_response(response);
        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamEvent::MessageEnd {
                finish_reason,
                usage,
            } => {
                assert_eq!(*finish_reason, FinishReason::Safety);
                assert_eq!(usage.total_tokens, 0);
            }
            _ => panic!("Expected message end"),
        }
    }

    #[test]
    fn test_from_gemini_response_no_candidates() {
        let response = wire::GenerateContentResponse {
            candidates: vec![],
            usage_metadata: None,
        };
        assert!(from_gemini_response(response).is_empty());
    }

    #[test]
    fn test_to_gemini_request_with_system_instruction() {
        let request = GenerateRequest {
            contents: vec![Content::user("What's the weather?")],
            system_instruction: Some("You are helpful".to_string()),
            config: GenerationConfig::default(),
        };

        let gemini_request = to_gemini_request(request);
        assert!(gemini_request.system_instruction.is_some());
        assert!(gemini_request.generation_config.is_none());
        assert_eq!(gemini_request.contents.len(), 1);
        assert_eq!(gemini_request.contents[0].role, "user");
    }
}
