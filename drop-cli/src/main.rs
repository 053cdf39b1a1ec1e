//! # drop-cli
//!
//! CLI client for the codedrop file relay.
//!
//! ## Commands
//!
//! - `create`: Create a session (minted or chosen code)
//! - `join`: Show a session's file listing
//! - `send`: Upload a file into a session
//! - `fetch`: Download a file from a session
//! - `watch`: Poll a session and print newly appeared files
//!
//! ## Example
//!
//! ```bash
//! # On the first device
//! drop-cli create --code 4444
//! drop-cli send 4444 ./photo.jpg
//!
//! # On another device
//! drop-cli join 4444
//! drop-cli fetch 4444 <file-id>
//! drop-cli watch 4444
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod client;
mod commands;

use client::RelayClient;

/// CLI client for the codedrop file relay.
#[derive(Parser, Debug)]
#[command(name = "drop-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the relay server
    #[arg(long, global = true, default_value = "http://127.0.0.1:3001")]
    relay: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a session
    Create {
        /// Claim a specific code (e.g. 4444) instead of a minted one
        #[arg(long)]
        code: Option<String>,
    },

    /// Show a session's file listing
    Join {
        /// Session code
        code: String,
    },

    /// Upload a file into a session
    Send {
        /// Session code
        code: String,

        /// File to upload
        file: PathBuf,
    },

    /// Download a file from a session
    Fetch {
        /// Session code
        code: String,

        /// File id (from `join` or `watch` output)
        file_id: String,

        /// Output path (defaults to the uploaded name)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Poll a session and print newly appeared files
    Watch {
        /// Session code
        code: String,

        /// Poll interval in seconds
        #[arg(long, default_value = "2")]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = RelayClient::new(&cli.relay);

    match cli.command {
        Commands::Create { code } => {
            commands::create::run(&client, code.as_deref()).await?;
        }
        Commands::Join { code } => {
            commands::join::run(&client, &code).await?;
        }
        Commands::Send { code, file } => {
            commands::send::run(&client, &code, &file).await?;
        }
        Commands::Fetch {
            code,
            file_id,
            output,
        } => {
            commands::fetch::run(&client, &code, &file_id, output.as_deref()).await?;
        }
        Commands::Watch { code, interval } => {
            commands::watch::run(&client, &code, interval).await?;
        }
    }

    Ok(())
}
