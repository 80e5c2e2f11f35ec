//! Repository port - account store abstraction

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Account, Movement};

/// Ordered store of accounts
///
/// Lookups return owned snapshots; mutations go through the store so that
/// every holder of an account id sees the same state.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Append a new account. Fails if its user id is already taken.
    async fn insert_account(&self, account: Account) -> Result<()>;

    /// Get all accounts in store order
    async fn get_accounts(&self) -> Result<Vec<Account>>;

    /// Get account by identity
    async fn get_account_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// First account whose user id matches
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Account>>;

    /// Append a movement to an account. Fails if the account's totals would
    /// no longer be representable.
    async fn append_movement(&self, id: Uuid, movement: Movement) -> Result<()>;

    /// Debit `from` and credit `to` by `amount`, both stamped `date`.
    /// Either both movements are appended or neither is.
    async fn record_transfer(
        &self,
        from: Uuid,
        to: Uuid,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Result<()>;

    /// Remove an account by identity, returning it
    async fn remove_account(&self, id: Uuid) -> Result<Account>;

    async fn account_count(&self) -> Result<usize>;
}
