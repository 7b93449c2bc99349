//! Prompt assembly for answering a query from retrieved passages

use std::collections::HashMap;

use super::template::PromptTemplate;
use crate::domain::DomainError;

/// Separator placed between retrieved passages inside the context block
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Formatting contract for generated answers
pub const SYSTEM_PROMPT: &str = r#"You are a Cloud and AI expert. Provide answers in CLEAN, SINGLE-PARAGRAPH format.

STRICT FORMATTING RULES - MUST FOLLOW:
1. **NO numbered lists**: Do not use "1.", "2.", "3." or any numbered formatting
2. **NO line breaks**: Entire response must be a single continuous paragraph
3. **Bullet formatting**: If listing items, use • with normal spacing: "Key points • First item • Second item"
4. **NO indentation**: No spaces or tabs at the beginning of lines
5. **NO markdown**: No **, *, #, or any formatting symbols

RESPONSE TEMPLATE - FOLLOW EXACTLY:
"[1-2 sentence direct answer]. [Supporting details in continuous sentences]. [If listing: Additional aspects include • Item one • Item two • Item three]. [Brief conclusion if needed]."

BAD EXAMPLES TO AVOID:
1. "Key points:\n   1. First point\n   2. Second point"
2. "Themes include:\n   * Theme one\n   * Theme two"
3. Any response with line breaks or numbered lists

GOOD EXAMPLES:
1. "Amazon's 2021 message emphasized pandemic resilience and growth. The company helped millions during COVID-19 while expanding services. Key achievements • Reached 200 million Prime members • Grew to 1.3 million employees • Supported 1.9 million small businesses. AWS reached $50 billion run rate, showing continued innovation."
2. "AWS provides scalable cloud solutions including compute, storage, and databases. Key features • On-demand availability • Global infrastructure • Flexible pricing. Organizations use these to improve agility and reduce costs."

If context insufficient: "Based on available information, I cannot provide a complete answer."

CRITICAL: Your entire response must be one paragraph with no line breaks or numbered lists."#;

/// User turn wrapping the retrieved context and the query
pub const USER_PROMPT_TEMPLATE: &str = r#"Here is some additional context:
<context>
${var:contexts}
</context>

Please provide an answer to this user query:
<query>
${var:query}
</query>

The response should be specific and use statistics or numbers when possible."#;

/// System and user text for one augmented generation call
#[derive(Debug, Clone, PartialEq)]
pub struct RagPrompt {
    pub system: String,
    pub user: String,
}

impl RagPrompt {
    /// Build the prompt for `query`, injecting `contexts` in the order given
    pub fn build(contexts: &[String], query: &str) -> Result<Self, DomainError> {
        let mut values = HashMap::new();
        values.insert("contexts".to_string(), contexts.join(CONTEXT_SEPARATOR));
        values.insert("query".to_string(), query.to_string());

        let user = PromptTemplate::parse(USER_PROMPT_TEMPLATE)
            .render(&values)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_contains_context_and_query() {
        let prompt = RagPrompt::build(
            &["AWS Lambda is serverless.".to_string()],
            "What is Lambda?",
        )
        .unwrap();

        assert!(prompt.user.contains("AWS Lambda is serverless."));
        assert!(prompt.user.contains("<query>\nWhat is Lambda?\n</query>"));
        assert_eq!(prompt.system, SYSTEM_PROMPT);
    }

    #[test]
    fn test_contexts_keep_their_order() {
        let contexts = vec![
            "second ranked".to_string(),
            "first ranked".to_string(),
            "second ranked".to_string(),
        ];
        let prompt = RagPrompt::build(&contexts, "q").unwrap();

        assert!(prompt
            .user
            .contains("<context>\nsecond ranked\n\nfirst ranked\n\nsecond ranked\n</context>"));
    }

    #[test]
    fn test_empty_context_block() {
        let prompt = RagPrompt::build(&[], "q").unwrap();
        assert!(prompt.user.contains("<context>\n\n</context>"));
    }

    #[test]
    fn test_query_with_template_syntax_is_literal() {
        let prompt = RagPrompt::build(&["ctx".to_string()], "${var:contexts}").unwrap();
        assert!(prompt.user.contains("<query>\n${var:contexts}\n</query>"));
    }

    #[test]
    fn test_system_prompt_is_single_paragraph_contract() {
        assert!(SYSTEM_PROMPT.contains("SINGLE-PARAGRAPH"));
        assert!(SYSTEM_PROMPT.contains("BAD EXAMPLES"));
        assert!(SYSTEM_PROMPT.contains("GOOD EXAMPLES"));
    }

    #[test]
    fn test_system_prompt_keeps_reference_answers() {
        assert!(SYSTEM_PROMPT.starts_with(
            "You are a Cloud and AI expert. Provide answers in CLEAN, SINGLE-PARAGRAPH format."
        ));
        assert!(SYSTEM_PROMPT.contains("Amazon's 2021 message emphasized pandemic resilience"));
        assert!(SYSTEM_PROMPT.contains(
            "If context insufficient: \"Based on available information, I cannot provide a complete answer.\""
        ));
    }
}
