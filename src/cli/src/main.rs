//! Command line front end for the benefits token client.

use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::PathBuf;
use structopt::StructOpt;
use tokenization_cli::commands::{attached, balance, burn, qr, role, send, upload_ticket};
use tokenization_cli::{config, secret, AUTHORIZATION_VAR, PRIVATE_KEY_VAR};
use tokenization_core::{env_vars, init_env_vars, BenefitCode, EnvVarsPatch};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the tokenization CLI.
#[derive(Debug, StructOpt)]
#[structopt(name = "tokenization", about = "Benefits token program client")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Chain JSON-RPC endpoint
    #[structopt(long)]
    rpc_url: Option<String>,

    /// Token contract address
    #[structopt(long)]
    contract: Option<String>,

    /// Ticket-processing backend URL
    #[structopt(long)]
    backend_url: Option<String>,

    /// Gas limit for write transactions
    #[structopt(long)]
    gas_limit: Option<u64>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the tokenization CLI.
#[derive(Debug, StructOpt)]
enum Command {
    /// Generate a citizen QR string
    #[structopt(name = "qr-citizen")]
    QrCitizen {
        /// DID or address of the citizen
        identifier: String,
    },

    /// Generate a merchant payment-request QR string
    #[structopt(name = "qr-merchant")]
    QrMerchant {
        /// Wallet address receiving the payment
        #[structopt(long)]
        wallet: String,

        /// Requested amount
        #[structopt(long)]
        amount: String,

        /// Payment concept
        #[structopt(long)]
        concept: String,
    },

    /// Decode a scanned QR string
    #[structopt(name = "qr-decode")]
    QrDecode {
        /// The QR string
        qr: String,
    },

    /// Get the token balance of an account
    #[structopt(name = "balance")]
    Balance {
        /// Account address
        address: String,
    },

    /// Get the role of an account
    #[structopt(name = "role")]
    Role {
        /// Account address
        address: String,
    },

    /// Get the benefit category of a citizen
    #[structopt(name = "benefit")]
    Benefit {
        /// Citizen address
        address: String,
    },

    /// Get the name of a merchant
    #[structopt(name = "merchant-name")]
    MerchantName {
        /// Merchant address
        address: String,
    },

    /// Send tokens to another account
    #[structopt(name = "send")]
    Send {
        /// Recipient address
        #[structopt(long)]
        to: String,

        /// Amount to send
        #[structopt(long)]
        amount: String,

        /// Note recorded with the transfer
        #[structopt(long)]
        note: Option<String>,

        /// Signing key (defaults to TOKENIZATION_PRIVATE_KEY)
        #[structopt(long)]
        private_key: Option<String>,
    },

    /// Burn tokens held by the signer
    #[structopt(name = "burn")]
    Burn {
        /// Amount to burn
        #[structopt(long)]
        amount: String,

        /// Note recorded with the burn
        #[structopt(long)]
        note: Option<String>,

        /// Signing key (defaults to TOKENIZATION_PRIVATE_KEY)
        #[structopt(long)]
        private_key: Option<String>,
    },

    /// Upload a ticket image for processing
    #[structopt(name = "upload-ticket")]
    UploadTicket {
        /// Aid category: 0/none, 1/stationery, 2/grocery
        #[structopt(long, parse(try_from_str = upload_ticket::parse_aid))]
        aid: BenefitCode,

        /// Path to the ticket image
        #[structopt(long, parse(from_os_str))]
        file: Option<PathBuf>,

        /// JSON file descriptor ({"uri", "name", "type"}) instead of a path
        #[structopt(long)]
        descriptor: Option<String>,

        /// Authorization header value (defaults to TOKENIZATION_AUTHORIZATION)
        #[structopt(long)]
        authorization: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opt = Opt::from_args();

    let overrides = EnvVarsPatch {
        back_end_url: opt.backend_url,
        blockchain_rpc_url: opt.rpc_url,
        smart_contract_address: opt.contract,
        gas_limit: opt.gas_limit,
    };
    let resolved = config::load(opt.config.as_deref(), overrides)?;
    init_env_vars(EnvVarsPatch {
        back_end_url: Some(resolved.back_end_url),
        blockchain_rpc_url: Some(resolved.blockchain_rpc_url),
        smart_contract_address: Some(resolved.smart_contract_address),
        gas_limit: Some(resolved.gas_limit),
    });
    let config = env_vars();

    match opt.cmd {
        Command::QrCitizen { identifier } => {
            println!("{}", qr::citizen(&identifier));
        }
        Command::QrMerchant {
            wallet,
            amount,
            concept,
        } => {
            println!("{}", qr::merchant(&wallet, &amount, &concept));
        }
        Command::QrDecode { qr: input } => {
            let decoded = qr::decode(&input)?;
            println!("{} {}", "Decoded:".green(), decoded);
        }
        Command::Balance { address } => {
            let balance = balance::run(&config, &address).await?;
            println!("{} {}", "Balance:".green(), balance);
        }
        Command::Role { address } => {
            let role = role::run(&config, &address).await?;
            println!("{} {}", "Role:".green(), role);
        }
        Command::Benefit { address } => {
            let benefit = attached::benefit(&config, &address).await?;
            println!("{} {} ({})", "Benefit:".green(), benefit, benefit.as_hex());
        }
        Command::MerchantName { address } => {
            let name = attached::merchant_name(&config, &address).await?;
            println!("{} {}", "Merchant:".green(), name);
        }
        Command::Send {
            to,
            amount,
            note,
            private_key,
        } => {
            let key = secret(private_key, PRIVATE_KEY_VAR)
                .ok_or_else(|| anyhow!("no private key given, set {}", PRIVATE_KEY_VAR))?;
            let outcome = send::run(&config, &key, &to, &amount, note.as_deref()).await?;
            println!("{} {:?}", "Transaction confirmed:".green(), outcome.tx_hash);
        }
        Command::Burn {
            amount,
            note,
            private_key,
        } => {
            let key = secret(private_key, PRIVATE_KEY_VAR)
                .ok_or_else(|| anyhow!("no private key given, set {}", PRIVATE_KEY_VAR))?;
            let outcome = burn::run(&config, &key, &amount, note.as_deref()).await?;
            println!("{} {:?}", "Tokens burned:".green(), outcome.tx_hash);
        }
        Command::UploadTicket {
            aid,
            file,
            descriptor,
            authorization,
        } => {
            let authorization = secret(authorization, AUTHORIZATION_VAR)
                .ok_or_else(|| anyhow!("no authorization given, set {}", AUTHORIZATION_VAR))?;
            let file = upload_ticket::ticket_file(file.as_deref(), descriptor.as_deref())?;
            let result = upload_ticket::run(&config, aid, file, &authorization).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
