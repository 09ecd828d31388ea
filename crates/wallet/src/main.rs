//! `sportx-sign`: sign SportX orders, fills, cancels and approvals from the
//! command line. Every command prints the relayer-ready JSON on stdout.

use std::path::{Path, PathBuf};

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sportx_core::api::{RpcChainReader, MAX_APPROVAL};
use sportx_core::config::ProtocolConfig;
use sportx_core::odds::{decimal_to_fixed_point, fixed_point_to_decimal};
use sportx_core::signing::{OrderSigner, SignerAdapter};
use sportx_core::types::{CancelIntent, FillDetailsMetadata, FillIntent, NewOrder};
use sportx_wallet::{DelegatedWalletSigner, TradingWallet};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sportx-sign", version, about = "Sign SportX exchange requests")]
struct Cli {
    /// Deployment config file; `SPORTX_*` environment variables otherwise.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Delegate signing to a wallet JSON-RPC endpoint instead of `WALLET_PRIVATE_KEY`.
    #[arg(long, global = true, requires = "account")]
    wallet_rpc: Option<String>,

    /// Account the delegated wallet signs for.
    #[arg(long, global = true)]
    account: Option<Address>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the signing address.
    Address,
    /// Sign new orders read from a JSON file (one order or an array).
    Order { file: PathBuf },
    /// Fill signed orders read from a JSON file.
    Fill {
        file: PathBuf,
        /// Taker amount per order, in order.
        #[arg(long, required = true, num_args = 1..)]
        amounts: Vec<String>,
        /// Metadata labels as a JSON file.
        #[arg(long)]
        metadata: Option<PathBuf>,
        #[arg(long)]
        affiliate: Option<String>,
        #[arg(long)]
        beneficiary: Option<String>,
    },
    /// Cancel orders by hash.
    Cancel {
        #[arg(required = true)]
        order_hashes: Vec<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Cancel every open order.
    CancelAll,
    /// Cancel every open order on one event.
    CancelEvent { sportx_event_id: String },
    /// Sign a meta-transaction approving the token transfer proxy.
    Approve {
        token: Address,
        /// Defaults to an unlimited allowance.
        #[arg(long)]
        amount: Option<U256>,
    },
    /// Sign a DAI-style permit for the token transfer proxy.
    Permit {
        token: Address,
        #[arg(long, default_value = "1")]
        token_version: String,
        #[arg(long)]
        nonce: Option<U256>,
    },
    /// Convert between decimal odds and fixed-point percentage odds.
    Odds {
        #[arg(long, conflicts_with = "fixed")]
        decimal: Option<f64>,
        #[arg(long)]
        fixed: Option<String>,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ProtocolConfig> {
    let config = match path {
        Some(path) => ProtocolConfig::from_file(path)?,
        None => ProtocolConfig::from_env()?,
    };
    Ok(config)
}

fn print_odds(decimal: Option<f64>, fixed: Option<String>) -> Result<()> {
    match (decimal, fixed) {
        (Some(decimal), _) => println!("{}", decimal_to_fixed_point(decimal)?),
        (None, Some(fixed)) => println!("{}", fixed_point_to_decimal(&fixed)?),
        (None, None) => anyhow::bail!("pass --decimal or --fixed"),
    }
    Ok(())
}

async fn run<S: SignerAdapter>(signer: OrderSigner<S>, command: Command) -> Result<()> {
    info!(
        address = %signer.address(),
        version = %signer.config().version,
        chain_id = signer.config().chain_id,
        "Signer ready"
    );

    match command {
        Command::Address => println!("{}", signer.address().to_checksum(None)),
        Command::Order { file } => {
            let value: serde_json::Value = read_json(&file)?;
            let orders: Vec<NewOrder> = match value {
                serde_json::Value::Array(_) => serde_json::from_value(value)?,
                single => vec![serde_json::from_value(single)?],
            };
            print_json(&signer.new_orders(orders).await?)?;
        }
        Command::Fill {
            file,
            amounts,
            metadata,
            affiliate,
            beneficiary,
        } => {
            let values: Vec<serde_json::Value> = read_json(&file)?;
            let orders = values
                .into_iter()
                .map(|value| signer.codec().parse_signed(value))
                .collect::<sportx_core::Result<Vec<_>>>()?;
            let metadata: FillDetailsMetadata = match metadata {
                Some(path) => read_json(&path)?,
                None => FillDetailsMetadata::default(),
            };

            let mut intent = FillIntent::new(orders, amounts).with_metadata(metadata);
            if let Some(affiliate) = affiliate {
                intent = intent.with_affiliate(affiliate);
            }
            if let Some(beneficiary) = beneficiary {
                intent = intent.with_beneficiary(beneficiary);
            }
            print_json(&signer.fill_orders(intent).await?)?;
        }
        Command::Cancel {
            order_hashes,
            message,
        } => {
            let intent = CancelIntent::ByHashes {
                order_hashes,
                message,
            };
            print_json(&signer.cancel(intent).await?)?
        }
        Command::CancelAll => print_json(&signer.cancel(CancelIntent::All).await?)?,
        Command::CancelEvent { sportx_event_id } => {
            print_json(&signer.cancel(CancelIntent::Event { sportx_event_id }).await?)?
        }
        Command::Approve { token, amount } => {
            let chain = RpcChainReader::from_config(signer.config())?;
            signer.verify_chain(&chain).await?;
            let approval = signer
                .approve_proxy_meta_transaction(&chain, token, amount.unwrap_or(MAX_APPROVAL))
                .await?;
            print_json(&approval)?;
        }
        Command::Permit {
            token,
            token_version,
            nonce,
        } => {
            let chain = RpcChainReader::from_config(signer.config())?;
            signer.verify_chain(&chain).await?;
            let permit = signer
                .approve_proxy_permit(&chain, token, &token_version, nonce)
                .await?;
            print_json(&permit)?;
        }
        Command::Odds { decimal, fixed } => print_odds(decimal, fixed)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sportx_sign=info,sportx_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Odds conversion needs neither a deployment nor a key.
    let command = match cli.command {
        Command::Odds { decimal, fixed } => return print_odds(decimal, fixed),
        command => command,
    };
    let config = load_config(cli.config.as_deref())?;

    match (cli.wallet_rpc, cli.account) {
        (Some(wallet_rpc), Some(account)) => {
            let signer = DelegatedWalletSigner::new(wallet_rpc, account);
            run(OrderSigner::new(config, signer)?, command).await
        }
        _ => {
            let wallet = TradingWallet::from_env()?;
            run(OrderSigner::new(config, wallet.into_signer())?, command).await
        }
    }
}
