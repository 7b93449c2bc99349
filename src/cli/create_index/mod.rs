//! Create-index command - recreates the knowledge base vector index

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::IndexConfig;
use crate::infrastructure::opensearch::{OpenSearchIndexClient, SigV4Signer};
use crate::infrastructure::services::IndexBootstrapService;

#[derive(Args, Debug, Clone, Default)]
pub struct CreateIndexArgs {
    /// Index name (defaults to the configured one)
    #[arg(long)]
    pub index: Option<String>,

    /// Collection endpoint (defaults to the configured environment variable)
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Drop and recreate the index, printing the bootstrap report as JSON
pub async fn run(args: CreateIndexArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let endpoint = resolve_endpoint(&args, &config.index)?;
    let index = args.index.unwrap_or_else(|| config.index.name.clone());

    let sdk_config = crate::load_aws_config(&config.aws.region).await;
    let signer = SigV4Signer::from_config(&sdk_config, &config.aws.region, &config.index.service)?;
    let client = OpenSearchIndexClient::new(&endpoint).with_signer(signer);

    info!(
        endpoint = %client.endpoint(),
        index = %index,
        service = %config.index.service,
        "Bootstrapping index"
    );

    let report = IndexBootstrapService::new(Arc::new(client))
        .with_readiness(config.index.readiness)
        .run(&index)
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn resolve_endpoint(args: &CreateIndexArgs, config: &IndexConfig) -> anyhow::Result<String> {
    if let Some(endpoint) = &args.endpoint {
        return Ok(endpoint.clone());
    }

    std::env::var(&config.endpoint_env).with_context(|| {
        format!(
            "Collection endpoint not set: export {} or pass --endpoint",
            config.endpoint_env
        )
    })
}
