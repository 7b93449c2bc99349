//! AWS Bedrock runtime Converse API with guardrails

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockRuntimeClient;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput as OutputContent, GuardrailAssessment as
    SdkGuardrailAssessment, GuardrailConfiguration, GuardrailTrace as SdkGuardrailTraceMode,
    GuardrailTraceAssessment, InferenceConfiguration, Message as SdkMessage, SystemContentBlock,
};

use crate::domain::llm::{AssessmentStage, GuardrailAssessment, PolicyFinding};
use crate::domain::{
    ConverseClient, ConverseRequest, ConverseResponse, DomainError, GuardrailTrace, MessageRole,
    StopReason, Usage,
};

/// Converse client on top of the Bedrock runtime API
#[derive(Clone)]
pub struct BedrockConverseClient {
    client: BedrockRuntimeClient,
}

impl Debug for BedrockConverseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockConverseClient").finish()
    }
}

impl BedrockConverseClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: BedrockRuntimeClient::new(config),
        }
    }
}

#[async_trait]
impl ConverseClient for BedrockConverseClient {
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse, DomainError> {
        let build_error = |e: aws_smithy_types::error::operation::BuildError| {
            DomainError::internal(format!("Failed to build converse request: {}", e))
        };

        let messages = request
            .messages
            .into_iter()
            .map(|m| {
                let role = match m.role {
                    MessageRole::User => ConversationRole::User,
                    MessageRole::Assistant => ConversationRole::Assistant,
                };

                SdkMessage::builder()
                    .role(role)
                    .content(ContentBlock::Text(m.text))
                    .build()
                    .map_err(build_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let system = request
            .system
            .into_iter()
            .map(SystemContentBlock::Text)
            .collect::<Vec<_>>();

        let inference = InferenceConfiguration::builder()
            .temperature(request.inference.temperature)
            .top_p(request.inference.top_p)
            .max_tokens(request.inference.max_tokens)
            .build();

        let mut call = self
            .client
            .converse()
            .model_id(&request.model_id)
            .set_system(Some(system))
            .set_messages(Some(messages))
            .inference_config(inference);

        if let Some(guardrail) = request.guardrail {
            let trace = if guardrail.trace {
                SdkGuardrailTraceMode::Enabled
            } else {
                SdkGuardrailTraceMode::Disabled
            };

            call = call.guardrail_config(
                GuardrailConfiguration::builder()
                    .guardrail_identifier(guardrail.identifier)
                    .guardrail_version(guardrail.version)
                    .trace(trace)
                    .build(),
            );
        }

        let output = call.send().await.map_err(|e| {
            DomainError::provider("bedrock", format!("Converse failed: {}", e.into_service_error()))
        })?;

        let content = match output.output() {
            Some(OutputContent::Message(message)) => message
                .content()
                .iter()
                .filter_map(|block| block.as_text().ok().cloned())
                .collect(),
            _ => Vec::new(),
        };

        let mut response =
            ConverseResponse::new(content, StopReason::from_wire(output.stop_reason().as_str()));

        if let Some(usage) = output.usage() {
            response = response.with_usage(Usage::new(
                usage.input_tokens().max(0) as u32,
                usage.output_tokens().max(0) as u32,
            ));
        }

        if let Some(trace) = output.trace().and_then(|t| t.guardrail()) {
            response = response.with_guardrail_trace(to_domain_trace(trace));
        }

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "bedrock"
    }
}

fn to_domain_trace(trace: &GuardrailTraceAssessment) -> GuardrailTrace {
    let mut input_assessments: Vec<GuardrailAssessment> = trace
        .input_assessment()
        .map(|assessments| {
            assessments
                .iter()
                .map(|(source, a)| to_domain_assessment(AssessmentStage::Input, source, a))
                .collect()
        })
        .unwrap_or_default();

    let mut output_assessments: Vec<GuardrailAssessment> = trace
        .output_assessments()
        .map(|assessments| {
            assessments
                .iter()
                .flat_map(|(source, list)| {
                    list.iter()
                        .map(|a| to_domain_assessment(AssessmentStage::Output, source, a))
                })
                .collect()
        })
        .unwrap_or_default();

    // The service returns maps; order by guardrail for stable logs
    input_assessments.sort_by(|a, b| a.source.cmp(&b.source));
    output_assessments.sort_by(|a, b| a.source.cmp(&b.source));

    GuardrailTrace {
        input_assessments,
        output_assessments,
        action_reason: trace.action_reason().map(str::to_string),
    }
}

fn to_domain_assessment(
    stage: AssessmentStage,
    source: &str,
    assessment: &SdkGuardrailAssessment,
) -> GuardrailAssessment {
    let mut result = GuardrailAssessment::new(stage, source);

    if let Some(topics) = assessment.topic_policy() {
        for topic in topics.topics() {
            result = result.with_finding(
                PolicyFinding::new("topic", topic.name(), topic.action().as_str())
                    .with_detail(topic.r#type().as_str()),
            );
        }
    }

    if let Some(content) = assessment.content_policy() {
        for filter in content.filters() {
            result = result.with_finding(
                PolicyFinding::new("content", filter.r#type().as_str(), filter.action().as_str())
                    .with_detail(format!("confidence={}", filter.confidence().as_str())),
            );
        }
    }

    if let Some(sensitive) = assessment.sensitive_information_policy() {
        for entity in sensitive.pii_entities() {
            result = result.with_finding(
                PolicyFinding::new(
                    "sensitive_information",
                    entity.r#type().as_str(),
                    entity.action().as_str(),
                )
                .with_detail(format!("match={}", entity.r#match())),
            );
        }

        for regex in sensitive.regexes() {
            let mut finding = PolicyFinding::new(
                "sensitive_information_regex",
                regex.name().unwrap_or("regex"),
                regex.action().as_str(),
            );
            if let Some(matched) = regex.r#match() {
                finding = finding.with_detail(format!("match={}", matched));
            }
            result = result.with_finding(finding);
        }
    }

    if let Some(words) = assessment.word_policy() {
        for word in words.custom_words() {
            result = result.with_finding(
                PolicyFinding::new("word", word.r#match(), word.action().as_str())
                    .with_detail("custom"),
            );
        }

        for word in words.managed_word_lists() {
            result = result.with_finding(
                PolicyFinding::new("word", word.r#match(), word.action().as_str())
                    .with_detail(format!("managed={}", word.r#type().as_str())),
            );
        }
    }

    if let Some(grounding) = assessment.contextual_grounding_policy() {
        for filter in grounding.filters() {
            result = result.with_finding(
                PolicyFinding::new(
                    "contextual_grounding",
                    filter.r#type().as_str(),
                    filter.action().as_str(),
                )
                .with_detail(format!(
                    "score={} threshold={}",
                    filter.score(),
                    filter.threshold()
                )),
            );
        }
    }

    if let Some(latency) = assessment
        .invocation_metrics()
        .and_then(|metrics| metrics.guardrail_processing_latency())
    {
        result = result.with_processing_latency_ms(latency.max(0) as u64);
    }

    result
}
