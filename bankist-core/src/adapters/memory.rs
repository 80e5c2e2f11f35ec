//! In-memory account store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Movement};
use crate::ports::AccountRepository;

/// Account store backed by an ordered vector
///
/// Nothing is persisted; the store lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list of accounts, enforcing unique user ids
    pub fn with_accounts(accounts: Vec<Account>) -> Result<Self> {
        let repo = Self::new();
        {
            let mut guard = repo.write()?;
            for account in accounts {
                Self::push_unique(&mut guard, account)?;
            }
        }
        Ok(repo)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Account>>> {
        self.accounts
            .read()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Account>>> {
        self.accounts
            .write()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }

    fn push_unique(accounts: &mut Vec<Account>, account: Account) -> Result<()> {
        account.validate().map_err(Error::validation)?;
        if accounts.iter().any(|a| a.user_id == account.user_id) {
            return Err(Error::DuplicateUserId(account.user_id));
        }
        if accounts.iter().any(|a| a.id == account.id) {
            return Err(Error::validation(format!("duplicate account id {}", account.id)));
        }
        accounts.push(account);
        Ok(())
    }

    fn position(accounts: &[Account], id: Uuid) -> Result<usize> {
        accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Error::not_found(id.to_string()))
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn insert_account(&self, account: Account) -> Result<()> {
        let mut accounts = self.write()?;
        Self::push_unique(&mut accounts, account)
    }

    async fn get_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.read()?.clone())
    }

    async fn get_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.read()?.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Account>> {
        Ok(self.read()?.iter().find(|a| a.user_id == user_id).cloned())
    }

    async fn append_movement(&self, id: Uuid, movement: Movement) -> Result<()> {
        let mut accounts = self.write()?;
        let index = Self::position(&accounts, id)?;
        let account = &mut accounts[index];
        if !account.accepts(movement.amount) {
            return Err(Error::validation("movement out of range for this account"));
        }
        account.push_movement(movement);
        Ok(())
    }

    async fn record_transfer(
        &self,
        from: Uuid,
        to: Uuid,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Result<()> {
        let mut accounts = self.write()?;
        let source = Self::position(&accounts, from)?;
        let target = Self::position(&accounts, to)?;

        if source == target {
            return Err(Error::transfer_rejected("cannot transfer to your own account"));
        }
        if !accounts[source].accepts(-amount) || !accounts[target].accepts(amount) {
            return Err(Error::transfer_rejected("amount out of range"));
        }

        accounts[source].push_movement(Movement::new(-amount, date));
        accounts[target].push_movement(Movement::new(amount, date));
        Ok(())
    }

    async fn remove_account(&self, id: Uuid) -> Result<Account> {
        let mut accounts = self.write()?;
        let index = Self::position(&accounts, id)?;
        Ok(accounts.remove(index))
    }

    async fn account_count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(owner: &str) -> Account {
        Account::new(Uuid::new_v4(), owner, 1234, Decimal::ONE, "USD", "en-US")
    }

    #[tokio::test]
    async fn test_find_by_user_id() {
        let repo = MemoryAccountRepository::with_accounts(vec![
            account("Jonas Schmedtmann"),
            account("Jessica Davis"),
        ])
        .unwrap();

        let found = repo.find_by_user_id("jd").await.unwrap().unwrap();
        assert_eq!(found.owner, "Jessica Davis");
        assert!(repo.find_by_user_id("xx").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_id_rejected() {
        let repo = MemoryAccountRepository::new();
        repo.insert_account(account("Jonas Schmedtmann")).await.unwrap();

        let err = repo
            .insert_account(account("Jane Smith"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateUserId(ref id) if id == "js"));
        assert_eq!(repo.account_count().await.unwrap(), 1);

        let err = MemoryAccountRepository::with_accounts(vec![
            account("Sarah Smith"),
            account("Steven Simms"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateUserId(_)));
    }

    #[tokio::test]
    async fn test_append_movement() {
        let acc = account("Jonas Schmedtmann");
        let id = acc.id;
        let repo = MemoryAccountRepository::with_accounts(vec![acc]).unwrap();

        repo.append_movement(id, Movement::new(Decimal::new(50, 0), Utc::now()))
            .await
            .unwrap();

        let stored = repo.get_account_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.movements().len(), 1);
        assert_eq!(stored.balance(), Decimal::new(50, 0));

        let err = repo
            .append_movement(Uuid::new_v4(), Movement::new(Decimal::ONE, Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(_)));
    }

    #[tokio::test]
    async fn test_append_movement_out_of_range() {
        let acc = account("Jonas Schmedtmann");
        let id = acc.id;
        let repo = MemoryAccountRepository::with_accounts(vec![acc]).unwrap();

        repo.append_movement(id, Movement::new(Decimal::MAX, Utc::now()))
            .await
            .unwrap();
        let err = repo
            .append_movement(id, Movement::new(Decimal::ONE, Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let stored = repo.get_account_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.movements().len(), 1);
    }

    #[tokio::test]
    async fn test_record_transfer() {
        let source = account("Jonas Schmedtmann");
        let target = account("Jessica Davis");
        let (source_id, target_id) = (source.id, target.id);
        let repo = MemoryAccountRepository::with_accounts(vec![source, target]).unwrap();
        let date = Utc::now();

        repo.record_transfer(source_id, target_id, Decimal::new(75, 0), date)
            .await
            .unwrap();

        let source = repo.get_account_by_id(source_id).await.unwrap().unwrap();
        let target = repo.get_account_by_id(target_id).await.unwrap().unwrap();
        assert_eq!(source.movements(), &[Movement::new(Decimal::new(-75, 0), date)]);
        assert_eq!(target.movements(), &[Movement::new(Decimal::new(75, 0), date)]);
    }

    #[tokio::test]
    async fn test_record_transfer_is_all_or_nothing() {
        let source = account("Jonas Schmedtmann");
        let target = account("Jessica Davis");
        let (source_id, target_id) = (source.id, target.id);
        let repo = MemoryAccountRepository::with_accounts(vec![source, target]).unwrap();

        // recipient closed before the transfer lands
        repo.remove_account(target_id).await.unwrap();
        let err = repo
            .record_transfer(source_id, target_id, Decimal::new(75, 0), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(ref id) if *id == target_id.to_string()));

        let err = repo
            .record_transfer(source_id, source_id, Decimal::ONE, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TransferRejected(_)));

        repo.append_movement(source_id, Movement::new(Decimal::MAX, Utc::now()))
            .await
            .unwrap();
        let other = account("Sarah Smith");
        let other_id = other.id;
        repo.insert_account(other).await.unwrap();
        repo.append_movement(other_id, Movement::new(Decimal::ONE, Utc::now()))
            .await
            .unwrap();
        let err = repo
            .record_transfer(other_id, source_id, Decimal::ONE, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TransferRejected(_)));

        let source = repo.get_account_by_id(source_id).await.unwrap().unwrap();
        let other = repo.get_account_by_id(other_id).await.unwrap().unwrap();
        assert_eq!(source.movements().len(), 1);
        assert_eq!(other.movements().len(), 1);
        assert_eq!(other.balance(), Decimal::ONE);
    }

    #[tokio::test]
    async fn test_remove_account_by_identity() {
        let first = account("Jonas Schmedtmann");
        let second = account("Jessica Davis");
        let third = account("Steven Thomas Williams");
        let second_id = second.id;
        let repo =
            MemoryAccountRepository::with_accounts(vec![first, second, third]).unwrap();

        let removed = repo.remove_account(second_id).await.unwrap();
        assert_eq!(removed.user_id, "jd");

        let remaining: Vec<String> = repo
            .get_accounts()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.user_id)
            .collect();
        assert_eq!(remaining, vec!["js", "stw"]);

        assert!(repo.remove_account(second_id).await.is_err());
        assert_eq!(repo.account_count().await.unwrap(), 2);
    }
}
