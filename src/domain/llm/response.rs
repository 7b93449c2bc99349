use serde::{Deserialize, Serialize};

use super::GuardrailTrace;

/// Why generation stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    GuardrailIntervened,
    ContentFiltered,
    Other(String),
}

impl StopReason {
    /// Map a wire stop reason (`end_turn`, `guardrail_intervened`, ...) to the enum
    pub fn from_wire(value: &str) -> Self {
        match value {
            "end_turn" => Self::EndTurn,
            "max_tokens" => Self::MaxTokens,
            "stop_sequence" => Self::StopSequence,
            "guardrail_intervened" => Self::GuardrailIntervened,
            "content_filtered" => Self::ContentFiltered,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// Response from a converse call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverseResponse {
    /// Text content blocks of the output message, in order
    pub content: Vec<String>,
    pub stop_reason: StopReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardrail_trace: Option<GuardrailTrace>,
}

impl ConverseResponse {
    pub fn new(content: Vec<String>, stop_reason: StopReason) -> Self {
        Self {
            content,
            stop_reason,
            usage: None,
            guardrail_trace: None,
        }
    }

    /// Single-block text answer that ended normally
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![text.into()], StopReason::EndTurn)
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_guardrail_trace(mut self, trace: GuardrailTrace) -> Self {
        self.guardrail_trace = Some(trace);
        self
    }

    /// Text of the first content block
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(String::as_str)
    }

    pub fn guardrail_intervened(&self) -> bool {
        self.stop_reason == StopReason::GuardrailIntervened
    }
}
