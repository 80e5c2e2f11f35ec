//! Bankist CLI - a demo bank in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, logs, shell, summary};

/// Bankist - a demo bank in your terminal
#[derive(Parser)]
#[command(name = "bankist", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive banking session (default)
    Shell,

    /// Log in once and print the account overview
    Summary {
        /// User id, e.g. "js"
        user: String,
        /// PIN (prompted when omitted)
        #[arg(long, env = "BANKIST_PIN", hide_env_values = true)]
        pin: Option<u32>,
        /// Sort movements by amount
        #[arg(long)]
        sorted: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the accounts in the bank
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run().await,
        Commands::Summary { user, pin, sorted, json } => summary::run(&user, pin, sorted, json).await,
        Commands::Accounts { json } => accounts::run(json).await,
        Commands::Logs { command } => logs::run(command),
    }
}
