mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reelsync")]
#[command(about = "Film catalog with scheduled SWAPI reconciliation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API and the sync scheduler
    Serve {
        #[arg(short, long, default_value = "3000", env = "REELSYNC_PORT")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "REELSYNC_HOST")]
        host: String,
    },
    /// Run one reconciliation pass and print the report as JSON
    Sync,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Sync => commands::sync::run().await,
    }
}
