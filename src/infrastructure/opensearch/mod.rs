//! OpenSearch Serverless index administration

mod client;
mod signer;

pub use client::OpenSearchIndexClient;
pub use signer::SigV4Signer;
