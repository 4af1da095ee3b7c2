//! CertAnchor CLI - certificate fingerprinting, anchoring, and verification.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{canonicalize, derive_id, fingerprint, issue, verify};

#[derive(Parser)]
#[command(name = "certanchor")]
#[command(about = "Certificate fingerprinting, anchoring, and verification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Compute the canonical payload and content fingerprint for a record
    Fingerprint {
        /// Path to certificate record JSON
        record: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Derive the ledger lookup id for a record
    DeriveId {
        /// Path to certificate record JSON
        record: String,
    },
    /// Anchor a certificate on the configured registry
    Issue {
        /// Path to certificate record JSON
        record: String,
        /// Off-chain storage locator recorded alongside the fingerprint
        #[arg(long)]
        uri: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify a certificate id against the registry
    Verify {
        /// Certificate id: raw hex or a verification URL ending in the id
        id: String,
        /// Path to the local certificate record JSON
        #[arg(long)]
        record: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code unless the verdict is verified
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Fingerprint { record, json } => fingerprint::run(record, json),
        Commands::DeriveId { record } => derive_id::run(record),
        Commands::Issue { record, uri, json } => issue::run(record, uri, json).await,
        Commands::Verify {
            id,
            record,
            json,
            strict,
        } => verify::run(id, record, json, strict).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
