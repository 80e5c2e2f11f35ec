//! Accounts command - list the accounts in the bank

use anyhow::Result;
use colored::Colorize;

use bankist_core::services::StatusSummary;
use bankist_core::{EntryPoint, OperationResult};

use super::{get_context, log_with};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context(EntryPoint::Cli)?;
    log_with(&ctx.logger, |l| l.log_command("accounts"));
    let status = ctx.status_service.get_status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(status))?);
        return Ok(());
    }

    print_status(&status);
    Ok(())
}

pub fn print_status(status: &StatusSummary) {
    println!("{}", "Accounts".bold());

    let mut table = output::create_table();
    table.set_header(vec!["User", "Owner", "Currency", "Locale", "Movements"]);
    for account in &status.accounts {
        table.add_row(vec![
            account.user_id.clone(),
            account.owner.clone(),
            account.currency.clone(),
            account.locale.clone(),
            account.movement_count.to_string(),
        ]);
    }
    println!("{}", table);
    println!(
        "{} accounts, {} movements",
        status.total_accounts, status.total_movements
    );
}
