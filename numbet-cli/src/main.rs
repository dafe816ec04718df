mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use numbet_core::{ApiClient, NumbetError};
use numbet_game::BettingError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "numbet")]
#[command(about = "numbet - numbers betting and wallet client")]
#[command(version)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend API base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token from a previous login
    #[arg(long, global = true, env = "NUMBET_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login, registration and profile
    #[command(subcommand)]
    Auth(commands::AuthCommands),

    /// Identity verification
    #[command(subcommand)]
    Kyc(commands::KycCommands),

    /// Deposits, withdrawals and history
    #[command(subcommand)]
    Wallet(commands::WalletCommands),

    /// Pick numbers and place bets in a game
    Play(commands::PlayArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let mut config = CliConfig::load(&config_path)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    // Initialize logging
    let log_level = if cli.verbose || config.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "numbet={},numbet_core={},numbet_game={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config_path.exists() {
        tracing::debug!("Loaded config from {}", config_path.display());
    } else {
        tracing::debug!("No config at {}, using defaults", config_path.display());
    }

    let client = ApiClient::new(config.client_config())?;
    if let Some(token) = cli.token {
        client.set_token(token);
    }

    let result = match cli.command {
        Commands::Auth(cmd) => commands::handle_auth_command(cmd, &client).await,
        Commands::Kyc(cmd) => commands::handle_kyc_command(cmd, &client).await,
        Commands::Wallet(cmd) => commands::handle_wallet_command(cmd, &client).await,
        Commands::Play(args) => commands::handle_play_command(args, &client, &config).await,
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn report(e: &anyhow::Error) {
    let core = e.downcast_ref::<NumbetError>().or_else(|| match e.downcast_ref::<BettingError>() {
        Some(BettingError::Core(inner)) => Some(inner),
        _ => None,
    });

    match core {
        Some(NumbetError::Unauthorized(msg)) => {
            eprintln!("Error: Not authorized: {}", msg);
            eprintln!("Use 'numbet auth login <phone>' and export NUMBET_TOKEN");
        }
        Some(NumbetError::Validation(msg)) => {
            eprintln!("Error: {}", msg);
        }
        Some(NumbetError::Network(msg)) | Some(NumbetError::Timeout(msg)) => {
            eprintln!("Error: Could not reach the server: {}", msg);
        }
        Some(NumbetError::Server { status, message }) => {
            eprintln!("Error: Server rejected the request ({}): {}", status, message);
        }
        _ => {
            eprintln!("Error: {:#}", e);
        }
    }
}
