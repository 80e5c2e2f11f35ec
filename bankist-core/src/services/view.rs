//! View rendering - everything the display surface shows for an account

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::format::{format_date_time, format_money, relative_day_label};
use crate::domain::{Account, AccountSummary, MovementKind, SortOrder};

pub const LOGGED_OUT_MESSAGE: &str = "Log in to get started";

/// Rendered state of the logged-in account
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub welcome: String,
    pub current_date: String,
    pub balance: String,
    pub deposits: String,
    pub withdrawals: String,
    pub interest: String,
    pub summary: AccountSummary,
    pub sort: SortOrder,
    /// Newest first
    pub movements: Vec<MovementRow>,
    /// Remaining session time, `MM:SS`
    pub time_left: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovementRow {
    /// 1-based position in the displayed order
    pub position: usize,
    pub kind: MovementKind,
    pub date_label: String,
    /// Formatted absolute amount
    pub amount: String,
    pub raw_amount: Decimal,
}

/// Render an account at `now`
pub fn render(account: &Account, sort: SortOrder, now: DateTime<Utc>, time_left: String) -> AccountView {
    let money = |amount: Decimal| format_money(amount, &account.locale, &account.currency);
    let summary = AccountSummary::of(account);

    let mut movements: Vec<MovementRow> = sort
        .apply(account.movements())
        .into_iter()
        .enumerate()
        .map(|(i, movement)| MovementRow {
            position: i + 1,
            kind: movement.kind(),
            date_label: relative_day_label(movement.date, now, &account.locale),
            amount: money(movement.amount.abs()),
            raw_amount: movement.amount,
        })
        .collect();
    movements.reverse();

    AccountView {
        welcome: format!("Welcome back, {}", account.first_name()),
        current_date: format_date_time(now, &account.locale),
        balance: money(summary.balance),
        deposits: money(summary.deposits),
        withdrawals: money(summary.withdrawals),
        interest: money(summary.interest),
        summary,
        sort,
        movements,
        time_left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movement;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn account(now: DateTime<Utc>) -> Account {
        Account::new(
            Uuid::new_v4(),
            "Jessica Davis",
            2222,
            Decimal::new(12, 1),
            "USD",
            "en-US",
        )
        .with_movements(vec![
            Movement::new(Decimal::new(200, 0), now - Duration::days(10)),
            Movement::new(Decimal::new(-100, 0), now - Duration::days(1)),
            Movement::new(Decimal::new(50, 0), now - Duration::hours(2)),
        ])
    }

    #[test]
    fn test_render_chronological() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let view = render(&account(now), SortOrder::Chronological, now, "02:00".into());

        assert_eq!(view.welcome, "Welcome back, Jessica");
        assert_eq!(view.current_date, "6/10/2024, 12:00 PM");
        assert_eq!(view.balance, "$150.00");
        assert_eq!(view.deposits, "$250.00");
        assert_eq!(view.withdrawals, "$100.00");
        assert_eq!(view.interest, "$3.00");
        assert_eq!(view.time_left, "02:00");

        let positions: Vec<usize> = view.movements.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![3, 2, 1]);

        let newest = &view.movements[0];
        assert_eq!(newest.kind, MovementKind::Deposit);
        assert_eq!(newest.date_label, "TODAY");
        assert_eq!(newest.amount, "$50.00");

        let withdrawal = &view.movements[1];
        assert_eq!(withdrawal.kind, MovementKind::Withdrawal);
        assert_eq!(withdrawal.date_label, "YESTERDAY");
        assert_eq!(withdrawal.amount, "$100.00");

        assert_eq!(view.movements[2].date_label, "5/31/2024");
    }

    #[test]
    fn test_render_sorted_keeps_dates_with_amounts() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let view = render(&account(now), SortOrder::Ascending, now, "01:00".into());

        // ascending order, displayed largest first
        let amounts: Vec<Decimal> = view.movements.iter().map(|r| r.raw_amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::new(200, 0), Decimal::new(50, 0), Decimal::new(-100, 0)]
        );
        assert_eq!(view.movements[0].date_label, "5/31/2024");
        assert_eq!(view.movements[2].date_label, "YESTERDAY");
        assert_eq!(view.sort, SortOrder::Ascending);
    }
}
