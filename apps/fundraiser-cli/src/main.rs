use clap::{Parser, Subcommand};
use fundraiser_client::{CampaignOrchestrator, ClientConfig, KeypairWallet, RpcTransport};
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::Context;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "fundraiser")]
#[command(about = "Fundraiser CLI - Create and fund campaigns on Solana")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Solana RPC URL (overrides config)
    #[arg(short, long, global = true)]
    rpc_url: Option<String>,

    /// Campaign program id (overrides config)
    #[arg(long, global = true)]
    program_id: Option<String>,

    /// Keypair file to connect with; without it the default Solana keypair is
    /// used if present
    #[arg(short, long, global = true)]
    keypair: Option<PathBuf>,

    /// Stop waiting after this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the wallet and print its public key
    Whoami,

    /// Create the campaign owned by the connected wallet
    Create {
        /// Campaign name
        #[arg(short, long)]
        name: String,

        /// Campaign description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all campaigns
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Donate lamports to a campaign
    Donate {
        /// Campaign address
        campaign: String,

        /// Amount in lamports
        lamports: u64,
    },

    /// Withdraw lamports from a campaign you own
    Withdraw {
        /// Campaign address
        campaign: String,

        /// Amount in lamports
        lamports: u64,
    },
}

fn default_keypair_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("solana")
            .join("id.json")
    })
}

fn load_config(cli: &Cli) -> CliResult<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(rpc_url) = &cli.rpc_url {
        config.rpc_url = rpc_url.clone();
    }
    if let Some(program_id) = &cli.program_id {
        config.program_id = program_id.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(
        "Using RPC {} ({}) with program {}",
        config.rpc_url,
        config.commitment,
        config.program_id
    );

    // An explicit keypair is an interactive approval; the default one is trusted
    let (wallet, interactive) = match &cli.keypair {
        Some(path) => (KeypairWallet::new(path, false), true),
        None => {
            let path = default_keypair_path().ok_or_else(|| {
                CliError::InvalidArgument("HOME is not set; pass --keypair".to_string())
            })?;
            (KeypairWallet::new(path, true), false)
        }
    };

    let transport = RpcTransport::new(config.rpc_url.clone(), config.commitment_config()?);
    let ctx = Context {
        client: CampaignOrchestrator::new(config.address_finder()?, wallet, transport),
        interactive,
        timeout: cli.timeout_secs.map(Duration::from_secs),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        match cli.command {
            Commands::Whoami => commands::whoami::execute(&ctx).await,

            Commands::Create { name, description } => {
                commands::create_campaign::execute(&ctx, name, description).await
            }

            Commands::List { json } => commands::list_campaigns::execute(&ctx, json).await,

            Commands::Donate { campaign, lamports } => {
                commands::donate::execute(&ctx, campaign, lamports).await
            }

            Commands::Withdraw { campaign, lamports } => {
                commands::withdraw::execute(&ctx, campaign, lamports).await
            }
        }
    })
}
