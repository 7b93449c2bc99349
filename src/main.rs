use bedrock_rag_lab::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::CreateIndex(args) => cli::create_index::run(args).await,
        Command::Invoke(args) => cli::invoke::run(args).await,
    }
}
