//! Infrastructure layer - AWS service adapters and runtime plumbing

pub mod bedrock;
pub mod logging;
pub mod opensearch;
pub mod parameters;
pub mod services;
