//! Converse (chat-style generation) domain models and traits

mod guardrail;
mod message;
mod provider;
mod request;
mod response;

pub use guardrail::{AssessmentStage, GuardrailAssessment, GuardrailTrace, PolicyFinding};
pub use message::{Message, MessageRole};
pub use provider::ConverseClient;
pub use request::{ConverseRequest, ConverseRequestBuilder, GuardrailConfig, InferenceSettings};
pub use response::{ConverseResponse, StopReason, Usage};

#[cfg(test)]
pub use provider::mock::MockConverseClient;
