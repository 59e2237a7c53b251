//! keysmith — SSH key pair generator.
//!
//! Generates RSA, Ed25519 and ECDSA key pairs in OpenSSH format, optionally
//! passphrase-protected and written to a directory, and inspects existing
//! public keys.

mod commands;
mod config;
mod worker;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use crate::commands::generate::GenerateArgs;

/// keysmith — SSH key pair generator
#[derive(Parser)]
#[command(name = "keysmith", version, about = "Generate and inspect OpenSSH key pairs")]
struct Cli {
    /// Config file path
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new key pair
    Generate {
        /// Key type: rsa, ed25519 or ecdsa
        #[arg(short = 't', long = "type")]
        key_type: Option<String>,

        /// Key size: 1024/2048/3072/4096 for rsa, 256/384/521 for ecdsa
        #[arg(short, long)]
        bits: Option<u32>,

        /// Comment appended to the public key
        #[arg(short = 'C', long)]
        comment: Option<String>,

        /// Passphrase for the private key (empty = unencrypted)
        #[arg(short = 'N', long, conflicts_with = "ask_passphrase")]
        passphrase: Option<String>,

        /// Prompt for the passphrase instead of taking it as an argument
        #[arg(long)]
        ask_passphrase: bool,

        /// Directory to write `<stem>` and `<stem>.pub` into
        #[arg(short, long = "output-dir")]
        output_dir: Option<String>,

        /// Print only, even if the config sets an output directory
        #[arg(long, conflicts_with = "output_dir")]
        no_save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show algorithm, size, comment and fingerprint of a public key file
    Inspect {
        /// Path to an OpenSSH public key (`*.pub`)
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    // Initialize tracing.
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter("keysmith=debug,keysmith_cli=debug")
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("keysmith=warn,keysmith_cli=warn")
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Command::Generate {
            key_type,
            bits,
            comment,
            passphrase,
            ask_passphrase,
            output_dir,
            no_save,
            json,
        } => {
            let config_path = cli.config.unwrap_or_else(config::default_path);
            match config::Config::load(&config_path) {
                Ok(cfg) => {
                    let args = GenerateArgs {
                        key_type,
                        bits,
                        comment,
                        passphrase,
                        ask_passphrase,
                        output_dir,
                        no_save,
                        json,
                    };
                    commands::generate::run(args, &cfg.defaults).await
                }
                Err(e) => Err(e),
            }
        }
        Command::Inspect { file, json } => commands::inspect::run(&file, json),
    };

    // One line on stderr: the tracing event when verbose, plain text otherwise.
    if let Err(e) = result {
        if verbose {
            error!("{:#}", e);
        } else {
            eprintln!("keysmith: {e:#}");
        }
        std::process::exit(1);
    }
}
