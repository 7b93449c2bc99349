use serde::{Deserialize, Serialize};

use super::Message;
use crate::domain::parameters::GuardrailSettings;

/// Sampling parameters for a converse call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: i32,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 0.9,
            max_tokens: 500,
        }
    }
}

/// Guardrail applied to both the input and the output of a converse call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    pub identifier: String,
    pub version: String,
    /// Ask the service to return the assessment trace
    pub trace: bool,
}

impl From<GuardrailSettings> for GuardrailConfig {
    fn from(settings: GuardrailSettings) -> Self {
        Self {
            identifier: settings.identifier,
            version: settings.version,
            trace: true,
        }
    }
}

/// Chat-style generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverseRequest {
    pub model_id: String,
    pub system: Vec<String>,
    pub messages: Vec<Message>,
    pub inference: InferenceSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardrail: Option<GuardrailConfig>,
}

impl ConverseRequest {
    pub fn builder(model_id: impl Into<String>) -> ConverseRequestBuilder {
        ConverseRequestBuilder::new(model_id)
    }

    /// Text of the first user message
    pub fn user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == super::MessageRole::User)
            .map(|m| m.text.as_str())
    }
}

/// Builder for ConverseRequest
#[derive(Debug)]
pub struct ConverseRequestBuilder {
    model_id: String,
    system: Vec<String>,
    messages: Vec<Message>,
    inference: InferenceSettings,
    guardrail: Option<GuardrailConfig>,
}

impl ConverseRequestBuilder {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            system: Vec::new(),
            messages: Vec::new(),
            inference: InferenceSettings::default(),
            guardrail: None,
        }
    }

    pub fn system(mut self, text: impl Into<String>) -> Self {
        self.system.push(text.into());
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn inference(mut self, inference: InferenceSettings) -> Self {
        self.inference = inference;
        self
    }

    pub fn guardrail(mut self, guardrail: GuardrailConfig) -> Self {
        self.guardrail = Some(guardrail);
        self
    }

    pub fn build(self) -> ConverseRequest {
        ConverseRequest {
            model_id: self.model_id,
            system: self.system,
            messages: self.messages,
            inference: self.inference,
            guardrail: self.guardrail,
        }
    }
}
