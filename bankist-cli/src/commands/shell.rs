//! Shell command - interactive banking session
//!
//! Reads one command per line. The inactivity countdown is raced against
//! stdin, so an idle session is logged out as soon as it expires.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};

use bankist_core::services::{format::format_countdown, LOGGED_OUT_MESSAGE};
use bankist_core::{AccountView, BankistContext, EntryPoint, SessionController};

use super::{accounts, get_context, log_with};
use crate::output;

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Log in with user id and PIN
    Login { user: String, pin: u32 },
    /// Send money to another user
    Transfer {
        to: String,
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },
    /// Request a loan (up to 10% of your largest movement)
    Loan {
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },
    /// Close your account
    Close { user: String, pin: u32 },
    /// Toggle sorting movements by amount
    Sort,
    /// Show your account again
    Show,
    /// Log out
    Logout,
    /// List the accounts in the bank
    Accounts,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

impl ShellCommand {
    fn name(&self) -> &'static str {
        match self {
            ShellCommand::Login { .. } => "login",
            ShellCommand::Transfer { .. } => "transfer",
            ShellCommand::Loan { .. } => "loan",
            ShellCommand::Close { .. } => "close",
            ShellCommand::Sort => "sort",
            ShellCommand::Show => "show",
            ShellCommand::Logout => "logout",
            ShellCommand::Accounts => "accounts",
            ShellCommand::Quit => "quit",
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run() -> Result<()> {
    let ctx = get_context(EntryPoint::Shell)?;
    let mut controller = ctx.session_controller();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    log_with(&ctx.logger, |l| l.log_event("shell_started"));

    output::info(LOGGED_OUT_MESSAGE);
    println!("{}", "Type 'help' for commands.".dimmed());

    loop {
        prompt(&controller)?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = controller.expiry() => {
                if controller.check_expiry() {
                    println!();
                    output::warning("Logged out after inactivity");
                    output::info(LOGGED_OUT_MESSAGE);
                }
                continue;
            }
        };

        let Some(line) = line else { break };
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                if e.use_stderr() {
                    log_with(&ctx.logger, |l| {
                        l.log_error("command_invalid", &e.kind().to_string(), None)
                    });
                }
                let _ = e.print();
                continue;
            }
        };

        let name = parsed.command.name();
        log_with(&ctx.logger, |l| l.log_command(name));

        match execute(&ctx, &mut controller, parsed.command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                log_with(&ctx.logger, |l| {
                    l.log_error("command_failed", &format!("{:#}", e), Some(name))
                });
                return Err(e);
            }
        }
    }

    controller.logout();
    log_with(&ctx.logger, |l| l.log_event("shell_exited"));
    Ok(())
}

async fn execute(
    ctx: &BankistContext,
    controller: &mut SessionController,
    command: ShellCommand,
) -> Result<Flow> {
    match command {
        ShellCommand::Login { user, pin } => show(controller.login(&user, pin).await),
        ShellCommand::Transfer { to, amount } => {
            show(with_spinner("Processing transfer...", controller.transfer(&to, amount)).await)
        }
        ShellCommand::Loan { amount } => {
            show(with_spinner("Processing loan...", controller.request_loan(amount)).await)
        }
        ShellCommand::Close { user, pin } => match controller.close_account(&user, pin).await {
            Ok(account) => {
                output::success(&format!("Account of {} closed", account.owner));
                output::info(LOGGED_OUT_MESSAGE);
            }
            Err(e) => output::report(&e),
        },
        ShellCommand::Sort => show(controller.toggle_sort().await),
        ShellCommand::Show => show(controller.view().await),
        ShellCommand::Logout => {
            if controller.logout() {
                output::info(LOGGED_OUT_MESSAGE);
            } else {
                output::warning("Not logged in");
            }
        }
        ShellCommand::Accounts => {
            let status = ctx.status_service.get_status().await?;
            accounts::print_status(&status);
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn show(result: bankist_core::domain::result::Result<AccountView>) {
    match result {
        Ok(view) => output::print_view(&view),
        Err(e) => output::report(&e),
    }
}

fn prompt(controller: &SessionController) -> Result<()> {
    match controller.time_left() {
        Some(ticks) => print!("[{}] > ", format_countdown(ticks)),
        None => print!("> "),
    }
    std::io::stdout().flush()?;
    Ok(())
}

async fn with_spinner<F: Future>(message: &'static str, operation: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = operation.await;
    spinner.finish_and_clear();
    output
}
