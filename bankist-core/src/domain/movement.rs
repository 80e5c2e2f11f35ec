//! Movement domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single signed transaction on an account: positive is a deposit,
/// anything else a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

impl Movement {
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    pub fn kind(&self) -> MovementKind {
        if self.amount > Decimal::ZERO {
            MovementKind::Deposit
        } else {
            MovementKind::Withdrawal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }
}

/// Display order of the movement list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Chronological,
    Ascending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Chronological => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Chronological,
        }
    }

    /// Apply this order to a list of movements.
    ///
    /// Ascending is a stable sort by signed amount; each movement keeps its
    /// own date.
    pub fn apply<'a>(&self, movements: &'a [Movement]) -> Vec<&'a Movement> {
        let mut ordered: Vec<&Movement> = movements.iter().collect();
        if *self == SortOrder::Ascending {
            ordered.sort_by(|a, b| a.amount.cmp(&b.amount));
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mov(amount: i64, day: u32) -> Movement {
        Movement::new(
            Decimal::new(amount, 0),
            Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_kind() {
        assert_eq!(mov(10, 1).kind(), MovementKind::Deposit);
        assert_eq!(mov(-10, 1).kind(), MovementKind::Withdrawal);
        assert_eq!(mov(0, 1).kind(), MovementKind::Withdrawal);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let order = SortOrder::default();
        assert_eq!(order, SortOrder::Chronological);
        assert_eq!(order.toggled(), SortOrder::Ascending);
        assert_eq!(order.toggled().toggled(), order);
    }

    #[test]
    fn test_ascending_is_stable_and_keeps_dates() {
        let movements = vec![mov(200, 1), mov(-50, 2), mov(200, 3), mov(-300, 4)];

        let sorted = SortOrder::Ascending.apply(&movements);
        let amounts: Vec<i64> = sorted
            .iter()
            .map(|m| m.amount.mantissa() as i64)
            .collect();
        assert_eq!(amounts, vec![-300, -50, 200, 200]);
        assert!(sorted.windows(2).all(|w| w[0].amount <= w[1].amount));

        // equal amounts keep their original relative order
        assert_eq!(sorted[2].date, movements[0].date);
        assert_eq!(sorted[3].date, movements[2].date);
        // dates travel with their amounts
        assert_eq!(sorted[0].date, movements[3].date);

        let chronological = SortOrder::Chronological.apply(&movements);
        assert_eq!(chronological[1], &movements[1]);
    }
}
