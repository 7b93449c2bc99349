//! Prompt templates and RAG prompt assembly

mod rag;
mod template;

pub use rag::{RagPrompt, CONTEXT_SEPARATOR, SYSTEM_PROMPT, USER_PROMPT_TEMPLATE};
pub use template::{PromptTemplate, PromptVariable, TemplateError};
