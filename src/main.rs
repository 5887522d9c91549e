use clap::Parser;
use color_eyre::eyre::Result;
use courtside_cli::commands::Cli;
use courtside_client::config::ClientConfig;
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Parse arguments before touching the session so `--help` always works
    let cli = Cli::parse();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging; stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(token_path = %config.token_path.display(), "Configuration loaded");

    courtside_cli::run(cli, config).await
}
