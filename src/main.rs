//! buddha-market command line.
//!
//! ```text
//! buddha.toml + environment
//!     → config (load, overlay, validate)
//!     → subcommand
//!         deploy          → deploy::run_deployment (ChainFactory)
//!         accounts        → blockchain::list_accounts
//!         abi             → abi::ERC721_ABI
//!         token           → abi::Erc721Reader
//!         verify-status   → verify::EtherscanClient
//!         serve           → web::WebServer
//! ```
//!
//! Command output goes to stdout, logs and errors to stderr. Any failure
//! exits with status 1.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use buddha_market::abi::{erc721_abi, Erc721Reader, ERC721_ABI};
use buddha_market::blockchain::{list_accounts, BlockchainClient, TxBuilder, Wallet};
use buddha_market::config::loader::{load_or_default, DEFAULT_CONFIG_FILE};
use buddha_market::config::ProjectConfig;
use buddha_market::deploy::{run_deployment, ArtifactStore, ChainFactory};
use buddha_market::lifecycle::{wait_for_signal, Shutdown};
use buddha_market::observability::init_logging;
use buddha_market::verify::{EtherscanClient, VerificationStatus};
use buddha_market::web::{get_library, WebServer};

#[derive(Parser)]
#[command(name = "buddha-market", version)]
#[command(about = "Deploy and inspect the BuddhaNFT marketplace contracts", long_about = None)]
struct Cli {
    /// Project configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Network to use (defaults to `default_network` from the config)
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the contracts of the deployment plan, in order
    Deploy,
    /// Print the list of accounts
    Accounts,
    /// Print the ERC-721 interface
    Abi {
        /// Print as a JSON ABI instead of human-readable signatures
        #[arg(long)]
        json: bool,
    },
    /// Query a deployed ERC-721 token
    Token {
        /// Token contract address
        address: Address,
        #[command(subcommand)]
        query: TokenQuery,
    },
    /// Check whether a contract's source is verified on the explorer
    VerifyStatus {
        /// Contract address
        address: Address,
    },
    /// Serve the web front end
    Serve {
        /// Bind address (overrides `server.bind_address`)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Subcommand)]
enum TokenQuery {
    /// Token symbol
    Symbol,
    /// Number of tokens held by an owner
    BalanceOf { owner: Address },
    /// Metadata URI of a token
    TokenUri { token_id: U256 },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability.log_level, cli.verbose);

    let network = cli
        .network
        .clone()
        .unwrap_or_else(|| config.default_network.clone());

    match run(cli.command, config, &network).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: ProjectConfig, network_name: &str) -> Result<ExitCode, Box<dyn Error>> {
    match command {
        Commands::Deploy => deploy(&config, network_name).await,
        Commands::Accounts => {
            let network = config.network(network_name)?;
            for account in list_accounts(network).await? {
                println!("{account}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Abi { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&erc721_abi()?)?);
            } else {
                for signature in ERC721_ABI {
                    println!("{signature}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Token { address, query } => {
            let network = config.network(network_name)?;
            let client = BlockchainClient::new(network.clone(), None).await?;
            let reader = Erc721Reader::new(client, address)?;
            match query {
                TokenQuery::Symbol => println!("{}", reader.symbol().await?),
                TokenQuery::BalanceOf { owner } => println!("{}", reader.balance_of(owner).await?),
                TokenQuery::TokenUri { token_id } => println!("{}", reader.token_uri(token_id).await?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::VerifyStatus { address } => {
            let explorer = EtherscanClient::new(&config.etherscan)?;
            match explorer.source_status(address).await? {
                VerificationStatus::Verified {
                    contract_name,
                    compiler_version,
                } => println!("{address} verified: {contract_name} ({compiler_version})"),
                VerificationStatus::Unverified => println!("{address} not verified"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve { bind } => serve(config, network_name, bind).await,
    }
}

async fn deploy(config: &ProjectConfig, network_name: &str) -> Result<ExitCode, Box<dyn Error>> {
    let network = config.network(network_name)?;

    // Without configured keys the node signs with its own unlocked account
    let wallet = if network.accounts.is_empty() {
        None
    } else {
        Some(Wallet::from_accounts(&network.accounts, network.chain_id)?)
    };

    let client = BlockchainClient::new(network.clone(), wallet).await?;
    let tx = TxBuilder::connect(client).await?;

    if let Some(sender) = tx.sender() {
        let deployer = sender.address();
        tracing::info!(
            network = network_name,
            deployer = %deployer,
            contracts = config.deploy.contracts.len(),
            "Starting deployment"
        );
        match tx.client().get_balance(deployer).await {
            Ok(balance) => tracing::info!(deployer = %deployer, balance_wei = %balance, "Deployer balance"),
            Err(e) => tracing::warn!(error = %e, "Could not read deployer balance"),
        }
    }

    let factory = ChainFactory::new(ArtifactStore::new(&config.artifacts_dir), tx, &config.deploy);

    let report = run_deployment(
        &factory,
        &config.deploy.contracts,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await;

    Ok(ExitCode::from(report.exit_code()))
}

async fn serve(config: ProjectConfig, network_name: &str, bind: Option<String>) -> Result<ExitCode, Box<dyn Error>> {
    let network = config.network(network_name)?;
    let library = get_library(network_name, network).await;

    let bind = bind.unwrap_or_else(|| config.server.bind_address.clone());
    let listener = TcpListener::bind(&bind).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let reason = wait_for_signal().await;
        shutdown.trigger(reason);
    });

    WebServer::new(config, library).run(listener, server_shutdown).await?;
    Ok(ExitCode::SUCCESS)
}
