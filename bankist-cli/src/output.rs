//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use bankist_core::services::LOGGED_OUT_MESSAGE;
use bankist_core::{AccountView, Error, MovementKind, SortOrder};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Report a failed bank operation. Rejected input is a warning, anything
/// else an error.
pub fn report(err: &Error) {
    match err {
        Error::SessionExpired => {
            warning("Session expired");
            info(LOGGED_OUT_MESSAGE);
        }
        Error::NotLoggedIn => info(LOGGED_OUT_MESSAGE),
        e if e.is_rejection() => warning(&e.to_string()),
        e => error(&e.to_string()),
    }
}

/// Print the overview of the logged-in account
pub fn print_view(view: &AccountView) {
    println!("{}", view.welcome.bold());
    println!("As of {}", view.current_date.dimmed());
    println!();
    println!("Current balance  {}", view.balance.bold());
    println!();

    let mut table = create_table();
    table.set_header(vec!["#", "Type", "Date", "Amount"]);

    for row in &view.movements {
        let kind = match row.kind {
            MovementKind::Deposit => row.kind.as_str().green().to_string(),
            MovementKind::Withdrawal => row.kind.as_str().red().to_string(),
        };
        table.add_row(vec![
            row.position.to_string(),
            kind,
            row.date_label.clone(),
            row.amount.clone(),
        ]);
    }

    println!("{}", table);
    println!(
        "In {}  Out {}  Interest {}",
        view.deposits.green(),
        view.withdrawals.red(),
        view.interest.green()
    );

    let sort = match view.sort {
        SortOrder::Chronological => "by date",
        SortOrder::Ascending => "by amount",
    };
    println!(
        "{}",
        format!("Sorted {}. You will be logged out in {}", sort, view.time_left).dimmed()
    );
}
