//! CLI module for the RAG lab
//!
//! Provides subcommands for running the handlers in different modes:
//! - `serve`: HTTP server exposing every handler
//! - `create-index`: one-shot vector index bootstrap
//! - `invoke`: run one handler once against an event document

pub mod create_index;
pub mod invoke;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// RAG lab - knowledge base ingestion, retrieval and guarded generation on AWS Bedrock
#[derive(Parser)]
#[command(name = "bedrock-rag-lab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Drop and recreate the vector index, then wait until it is ready
    CreateIndex(create_index::CreateIndexArgs),

    /// Run a single handler against an event read from a file or stdin
    Invoke(invoke::InvokeArgs),
}

/// Load `.env` and the layered configuration, then start logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
