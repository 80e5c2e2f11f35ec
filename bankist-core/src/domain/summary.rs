//! Derived account totals

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::Account;

/// Balance, deposit, withdrawal and interest totals for an account.
/// Always recomputed from the movements, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub balance: Decimal,
    pub deposits: Decimal,
    /// Absolute sum of withdrawals
    pub withdrawals: Decimal,
    pub interest: Decimal,
}

impl AccountSummary {
    /// Totals of the given movements
    ///
    /// Saturates at the bounds of `Decimal`. Accounts held by the store never
    /// get there, since the store refuses movements for which [`checked`]
    /// fails.
    ///
    /// [`checked`]: AccountSummary::checked
    pub fn compute(amounts: impl IntoIterator<Item = Decimal>, interest_rate: Decimal) -> Self {
        let mut deposits = Decimal::ZERO;
        let mut withdrawals = Decimal::ZERO;
        for amount in amounts {
            if amount > Decimal::ZERO {
                deposits = deposits.saturating_add(amount);
            } else {
                withdrawals = withdrawals.saturating_add(amount);
            }
        }

        Self {
            balance: deposits.saturating_add(withdrawals),
            deposits,
            withdrawals: withdrawals.abs(),
            interest: Self::round_interest(deposits.saturating_mul(interest_rate) / Decimal::ONE_HUNDRED),
        }
    }

    /// Totals of the given movements, or `None` if any of them overflows
    pub fn checked(amounts: impl IntoIterator<Item = Decimal>, interest_rate: Decimal) -> Option<Self> {
        let mut deposits = Decimal::ZERO;
        let mut withdrawals = Decimal::ZERO;
        for amount in amounts {
            if amount > Decimal::ZERO {
                deposits = deposits.checked_add(amount)?;
            } else {
                withdrawals = withdrawals.checked_add(amount)?;
            }
        }

        let interest = deposits
            .checked_mul(interest_rate)?
            .checked_div(Decimal::ONE_HUNDRED)?;

        Some(Self {
            balance: deposits.checked_add(withdrawals)?,
            deposits,
            withdrawals: withdrawals.abs(),
            interest: Self::round_interest(interest),
        })
    }

    fn round_interest(interest: Decimal) -> Decimal {
        interest.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn of(account: &Account) -> Self {
        Self::compute(account.amounts(), account.interest_rate)
    }
}
