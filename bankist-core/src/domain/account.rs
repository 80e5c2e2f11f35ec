//! Account domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::movement::Movement;
use super::summary::AccountSummary;

/// A mock bank account
///
/// Movements and their dates live in one sequence, so every movement always
/// has exactly one date.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub owner: String,
    /// Login handle derived from the owner name
    pub user_id: String,
    movements: Vec<Movement>,
    /// Percentage applied to the sum of deposits
    pub interest_rate: Decimal,
    #[serde(skip_serializing)]
    pin: u32,
    /// ISO 4217 currency code, normalized to uppercase
    pub currency: String,
    /// BCP-47 locale tag used for display formatting
    pub locale: String,
}

impl Account {
    /// Create a new account without movements
    pub fn new(
        id: Uuid,
        owner: impl Into<String>,
        pin: u32,
        interest_rate: Decimal,
        currency: &str,
        locale: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        Self {
            id,
            user_id: Self::derive_user_id(&owner),
            owner,
            movements: Vec::new(),
            interest_rate,
            pin,
            currency: Self::normalize_currency(currency),
            locale: locale.into(),
        }
    }

    pub fn with_movements(mut self, movements: Vec<Movement>) -> Self {
        self.movements = movements;
        self
    }

    /// Lowercase initials of every word in the owner name
    pub fn derive_user_id(owner: &str) -> String {
        owner
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Normalize currency code to uppercase
    pub fn normalize_currency(currency: &str) -> String {
        currency.trim().to_uppercase()
    }

    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or("")
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.movements.iter().map(|m| m.amount)
    }

    pub fn dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|m| m.date)
    }

    pub fn push_movement(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    pub fn verify_pin(&self, pin: u32) -> bool {
        self.pin == pin
    }

    /// Sum of all movements
    pub fn balance(&self) -> Decimal {
        AccountSummary::compute(self.amounts(), self.interest_rate).balance
    }

    /// Whether a movement of `amount` keeps every total of this account
    /// representable
    pub fn accepts(&self, amount: Decimal) -> bool {
        AccountSummary::checked(
            self.amounts().chain(std::iter::once(amount)),
            self.interest_rate,
        )
        .is_some()
    }

    /// Largest single signed movement, if any
    pub fn max_movement(&self) -> Option<Decimal> {
        self.amounts().max()
    }

    /// Validate account data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.owner.trim().is_empty() {
            return Err("owner cannot be empty");
        }
        if self.user_id.is_empty() {
            return Err("user id cannot be empty");
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err("currency must be a three-letter code");
        }
        if self.interest_rate.is_sign_negative() {
            return Err("interest rate cannot be negative");
        }
        if AccountSummary::checked(self.amounts(), self.interest_rate).is_none() {
            return Err("movement totals out of range");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account(owner: &str) -> Account {
        Account::new(Uuid::new_v4(), owner, 1111, Decimal::new(12, 1), "eur", "pt-PT")
    }

    #[test]
    fn test_derive_user_id() {
        assert_eq!(Account::derive_user_id("Jonas Schmedtmann"), "js");
        assert_eq!(Account::derive_user_id("Steven Thomas Williams"), "stw");
        assert_eq!(Account::derive_user_id("  Sarah   Smith "), "ss");
        assert_eq!(Account::derive_user_id(""), "");
    }

    #[test]
    fn test_new_account() {
        let acc = account("Jessica Davis");
        assert_eq!(acc.user_id, "jd");
        assert_eq!(acc.first_name(), "Jessica");
        assert_eq!(acc.currency, "EUR");
        assert!(acc.verify_pin(1111));
        assert!(!acc.verify_pin(1112));
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert_eq!(acc.max_movement(), None);
    }

    #[test]
    fn test_balance_and_parallel_views() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut acc = account("Jonas Schmedtmann").with_movements(vec![
            Movement::new(Decimal::new(200, 0), date),
            Movement::new(Decimal::new(-100, 0), date),
        ]);
        acc.push_movement(Movement::new(Decimal::new(4550, 2), date));

        assert_eq!(acc.balance(), Decimal::new(14550, 2));
        assert_eq!(acc.max_movement(), Some(Decimal::new(200, 0)));
        assert_eq!(acc.amounts().count(), acc.dates().count());
    }

    #[test]
    fn test_validation() {
        let mut acc = account("Jonas Schmedtmann");
        assert!(acc.validate().is_ok());

        acc.currency = "EURO".to_string();
        assert!(acc.validate().is_err());

        let acc = account("   ");
        assert!(acc.validate().is_err());
    }

    #[test]
    fn test_accepts_only_representable_movements() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let acc = account("Jonas Schmedtmann")
            .with_movements(vec![Movement::new(Decimal::new(200, 0), date)]);

        assert!(acc.accepts(Decimal::new(-1_000_000, 0)));
        assert!(acc.accepts(Decimal::new(100_000_000_000_000_000, 0) * Decimal::ONE_THOUSAND));
        assert!(!acc.accepts(Decimal::MAX));

        let overdrawn = account("Jessica Davis")
            .with_movements(vec![Movement::new(Decimal::MIN, date)]);
        assert!(!overdrawn.accepts(Decimal::NEGATIVE_ONE));

        let broken = acc.with_movements(vec![
            Movement::new(Decimal::MAX, date),
            Movement::new(Decimal::MAX, date),
        ]);
        assert_eq!(broken.validate(), Err("movement totals out of range"));
    }

    #[test]
    fn test_pin_is_not_serialized() {
        let json = serde_json::to_value(account("Jonas Schmedtmann")).unwrap();
        assert!(json.get("pin").is_none());
        assert_eq!(json["user_id"], "js");
    }
}
