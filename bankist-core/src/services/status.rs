//! Status service - directory of accounts in the store

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::ports::AccountRepository;

/// Lists what is in the store without exposing balances or pins
pub struct StatusService {
    repository: Arc<dyn AccountRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_status(&self) -> Result<StatusSummary> {
        let accounts = self.repository.get_accounts().await?;

        Ok(StatusSummary {
            total_accounts: accounts.len(),
            total_movements: accounts.iter().map(|a| a.movements().len()).sum(),
            accounts: accounts
                .into_iter()
                .map(|a| AccountListing {
                    movement_count: a.movements().len(),
                    user_id: a.user_id,
                    owner: a.owner,
                    currency: a.currency,
                    locale: a.locale,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_accounts: usize,
    pub total_movements: usize,
    pub accounts: Vec<AccountListing>,
}

#[derive(Debug, Serialize)]
pub struct AccountListing {
    pub user_id: String,
    pub owner: String,
    pub currency: String,
    pub locale: String,
    pub movement_count: usize,
}
