//! Summary command - one-shot login and account overview

use anyhow::{bail, Context, Result};
use dialoguer::Password;

use bankist_core::{AccountView, EntryPoint, OperationResult};

use super::{get_context, log_with};
use crate::output;

/// Get the pin from --pin / BANKIST_PIN, or prompt when attached to a terminal
fn get_pin_or_prompt(pin: Option<u32>) -> Result<u32> {
    if let Some(p) = pin {
        return Ok(p);
    }

    if atty::isnt(atty::Stream::Stdin) {
        bail!("No PIN given. Pass --pin or set BANKIST_PIN");
    }

    let entered = Password::new().with_prompt("PIN").interact()?;
    entered.trim().parse().context("PIN must be a number")
}

pub async fn run(user: &str, pin: Option<u32>, sorted: bool, json: bool) -> Result<()> {
    let pin = get_pin_or_prompt(pin)?;
    let ctx = get_context(EntryPoint::Cli)?;
    log_with(&ctx.logger, |l| l.log_command("summary"));

    let mut controller = ctx.session_controller();
    let mut result = controller.login(user, pin).await;
    if sorted && result.is_ok() {
        result = controller.toggle_sort().await;
    }
    controller.logout();

    if json {
        let op: OperationResult<AccountView> = result.into();
        println!("{}", serde_json::to_string_pretty(&op)?);
        return Ok(());
    }

    let view = result?;
    output::print_view(&view);
    Ok(())
}
