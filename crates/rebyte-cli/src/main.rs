use anyhow::Result;
use rebyte_cli::{Cli, Commands, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Task { subcommand } => subcommand.run().await,
        Commands::Skill { subcommand } => subcommand.run().await,
        Commands::Agent { subcommand } => subcommand.run().await,
    }
}
