//! Vector search index administration

mod client;
mod readiness;
mod schema;

pub use client::SearchIndexClient;
pub use readiness::ReadinessPolicy;
pub use schema::{IndexSchema, KnnMethod, VECTOR_DIMENSION};

#[cfg(test)]
pub use client::mock::MockSearchIndexClient;
