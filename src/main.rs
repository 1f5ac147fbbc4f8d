use clap::Parser;
use deploy_scripts::{
    cli::Cli, config::NetworkConfig, errors::ScriptError, tx::client::StarknetClient,
};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    // Resolve the network configuration once, up front
    let config = NetworkConfig::from_env()?;

    // Build our account-bound RPC client
    let client = StarknetClient::connect(&config).await?;

    cli.run(&config, &client).await
}
