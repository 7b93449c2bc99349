use serde::{Deserialize, Serialize};

/// Which side of the model call an assessment covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStage {
    Input,
    Output,
}

/// A single policy hit inside an assessment (topic, content filter, PII entity, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFinding {
    pub policy: String,
    pub name: String,
    pub action: String,
    /// Matched text, confidence or grounding score, depending on the policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PolicyFinding {
    pub fn new(
        policy: impl Into<String>,
        name: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            policy: policy.into(),
            name: name.into(),
            action: action.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Guardrail assessment of one input or output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailAssessment {
    pub stage: AssessmentStage,
    /// Guardrail the assessment belongs to, as keyed in the trace
    pub source: String,
    pub findings: Vec<PolicyFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_latency_ms: Option<u64>,
}

impl GuardrailAssessment {
    pub fn new(stage: AssessmentStage, source: impl Into<String>) -> Self {
        Self {
            stage,
            source: source.into(),
            findings: Vec::new(),
            processing_latency_ms: None,
        }
    }

    pub fn with_finding(mut self, finding: PolicyFinding) -> Self {
        self.findings.push(finding);
        self
    }

    pub fn with_processing_latency_ms(mut self, latency_ms: u64) -> Self {
        self.processing_latency_ms = Some(latency_ms);
        self
    }
}

/// Guardrail section of a converse trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailTrace {
    pub input_assessments: Vec<GuardrailAssessment>,
    pub output_assessments: Vec<GuardrailAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_reason: Option<String>,
}

impl GuardrailTrace {
    pub fn is_empty(&self) -> bool {
        self.input_assessments.is_empty() && self.output_assessments.is_empty()
    }

    /// Input assessments first, then output assessments
    pub fn assessments(&self) -> impl Iterator<Item = &GuardrailAssessment> {
        self.input_assessments
            .iter()
            .chain(self.output_assessments.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessments_are_input_first() {
        let trace = GuardrailTrace {
            input_assessments: vec![GuardrailAssessment::new(AssessmentStage::Input, "gr-1")],
            output_assessments: vec![GuardrailAssessment::new(AssessmentStage::Output, "gr-1")],
            action_reason: None,
        };

        let stages: Vec<_> = trace.assessments().map(|a| a.stage).collect();
        assert_eq!(stages, vec![AssessmentStage::Input, AssessmentStage::Output]);
        assert!(!trace.is_empty());
    }

    #[test]
    fn test_assessment_serialization() {
        let assessment = GuardrailAssessment::new(AssessmentStage::Output, "gr-1")
            .with_finding(PolicyFinding::new("topic", "Investment advice", "BLOCKED"));

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["stage"], "output");
        assert_eq!(json["findings"][0]["action"], "BLOCKED");
        assert!(json["findings"][0].get("detail").is_none());
        assert!(json.get("processing_latency_ms").is_none());
    }

    #[test]
    fn test_finding_detail_is_serialized() {
        let finding = PolicyFinding::new("word", "badword", "BLOCKED").with_detail("custom");

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["name"], "badword");
        assert_eq!(json["detail"], "custom");
    }
}
