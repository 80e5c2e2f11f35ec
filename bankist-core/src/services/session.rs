//! Session service - login state machine and account commands
//!
//! A controller holds at most one session. Every command runs to completion
//! before the next starts (`&mut self`), so no two mutations interleave.
//! Transfers and loans wait out a simulated processing delay which is
//! abandoned if the inactivity countdown reaches zero first.

use std::future::Future;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::logging::LoggingService;
use super::timer::InactivityTimer;
use super::view::{self, AccountView};
use crate::config::SessionSettings;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, Movement, SortOrder};
use crate::ports::{AccountRepository, Clock};

/// Loans may not exceed this share of the largest single movement
pub const LOAN_LIMIT_PERCENT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

struct Session {
    account_id: Uuid,
    sort: SortOrder,
    timer: InactivityTimer,
}

/// Largest loan an account with the given movements may take
pub fn loan_limit(account: &Account) -> Option<Decimal> {
    account
        .max_movement()
        .map(|max| max * Decimal::from(LOAN_LIMIT_PERCENT) / Decimal::ONE_HUNDRED)
}

/// Drives one user's session against a shared account store
pub struct SessionController {
    repository: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    logger: Option<Arc<LoggingService>>,
    session: Option<Session>,
}

impl SessionController {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        clock: Arc<dyn Clock>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            repository,
            clock,
            settings,
            logger: None,
            session: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Logged in only while a session exists and its countdown is running
    pub fn state(&self) -> SessionState {
        match &self.session {
            Some(session) if !session.timer.is_expired() => SessionState::LoggedIn,
            _ => SessionState::LoggedOut,
        }
    }

    pub fn current_account_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.account_id)
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.session.as_ref().map(|s| s.sort)
    }

    /// Remaining ticks of the inactivity countdown
    pub fn time_left(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.timer.remaining())
    }

    /// Resolves when the current session's countdown reaches zero; never
    /// resolves while logged out. Follow up with [`check_expiry`].
    ///
    /// [`check_expiry`]: SessionController::check_expiry
    pub fn expiry(&self) -> impl Future<Output = ()> + Send + 'static {
        let expiry = self.session.as_ref().map(|s| s.timer.expiry());
        async move {
            match expiry {
                Some(expiry) => expiry.await,
                None => std::future::pending::<()>().await,
            }
        }
    }

    /// Log out if the countdown has run out. Returns true if this call
    /// ended the session.
    pub fn check_expiry(&mut self) -> bool {
        if self
            .session
            .as_ref()
            .is_some_and(|s| s.timer.is_expired())
        {
            self.end_session("session_expired");
            true
        } else {
            false
        }
    }

    /// Log in with a user id and pin
    ///
    /// A failed attempt leaves any existing session as it was. A successful
    /// one replaces it, cancelling the previous countdown.
    pub async fn login(&mut self, user_id: &str, pin: u32) -> Result<AccountView> {
        let account = match self.repository.find_by_user_id(user_id).await? {
            Some(account) => account,
            None => return self.reject("login_failed", "unknown user id", Error::not_found(user_id)),
        };

        if !account.verify_pin(pin) {
            return self.reject("login_failed", "pin mismatch", Error::InvalidCredentials);
        }

        self.session = Some(Session {
            account_id: account.id,
            sort: SortOrder::default(),
            timer: Self::start_timer(&self.settings),
        });
        self.log_event("login_succeeded");

        Ok(self.render(&account))
    }

    /// Move `amount` from the current account to the account of `to_user_id`
    pub async fn transfer(&mut self, to_user_id: &str, amount: Decimal) -> Result<AccountView> {
        let source_id = self.ensure_active()?;

        if amount <= Decimal::ZERO {
            return self.reject(
                "transfer_rejected",
                "non-positive amount",
                Error::transfer_rejected("amount must be positive"),
            );
        }

        let target = match self.repository.find_by_user_id(to_user_id).await? {
            Some(target) => target,
            None => {
                return self.reject(
                    "transfer_rejected",
                    "unknown recipient",
                    Error::transfer_rejected(format!("no account with user id '{}'", to_user_id)),
                )
            }
        };

        if target.id == source_id {
            return self.reject(
                "transfer_rejected",
                "recipient is sender",
                Error::transfer_rejected("cannot transfer to your own account"),
            );
        }

        let source = self.fetch_current(source_id).await?;
        if !source.accepts(-amount) || !target.accepts(amount) {
            return self.reject(
                "transfer_rejected",
                "amount out of range",
                Error::transfer_rejected("amount out of range"),
            );
        }

        self.simulate_processing().await?;

        // Either side may have been closed by another controller meanwhile
        let recorded = self
            .repository
            .record_transfer(source_id, target.id, amount, self.clock.now())
            .await;
        match recorded {
            Ok(()) => {}
            Err(Error::AccountNotFound(id)) if id == target.id.to_string() => {
                return self.reject(
                    "transfer_rejected",
                    "recipient closed",
                    Error::transfer_rejected("recipient account was closed"),
                );
            }
            Err(Error::AccountNotFound(_)) => {
                self.end_session("session_ended");
                return Err(Error::not_found(source_id.to_string()));
            }
            Err(e @ Error::TransferRejected(_)) => {
                return self.reject("transfer_rejected", "amount out of range", e);
            }
            Err(e) => return Err(e),
        }

        self.restart_timer();
        self.log_event("transfer_completed");

        let account = self.fetch_current(source_id).await?;
        Ok(self.render(&account))
    }

    /// Borrow up to [`LOAN_LIMIT_PERCENT`]% of the largest single movement
    pub async fn request_loan(&mut self, amount: Decimal) -> Result<AccountView> {
        let account_id = self.ensure_active()?;
        let account = self.fetch_current(account_id).await?;

        let limit = loan_limit(&account);
        let approved = amount > Decimal::ZERO
            && limit.is_some_and(|limit| amount <= limit)
            && account.accepts(amount);
        if !approved {
            return self.reject(
                "loan_rejected",
                "amount outside limit",
                Error::LoanRejected {
                    requested: amount,
                    limit,
                },
            );
        }

        self.simulate_processing().await?;

        self.repository
            .append_movement(account_id, Movement::new(amount, self.clock.now()))
            .await?;

        self.restart_timer();
        self.log_event("loan_granted");

        let account = self.fetch_current(account_id).await?;
        Ok(self.render(&account))
    }

    /// Close the current account after confirming its user id and pin.
    /// Returns the removed account; the session ends.
    pub async fn close_account(&mut self, user_id: &str, pin: u32) -> Result<Account> {
        let account_id = self.ensure_active()?;
        let account = self.fetch_current(account_id).await?;

        if account.user_id != user_id || !account.verify_pin(pin) {
            return self.reject("close_rejected", "credentials mismatch", Error::InvalidCredentials);
        }

        let removed = self.repository.remove_account(account_id).await?;
        self.end_session("account_closed");
        Ok(removed)
    }

    /// Switch between chronological and ascending movement order.
    /// Does not count as activity for the inactivity countdown.
    pub async fn toggle_sort(&mut self) -> Result<AccountView> {
        let account_id = self.ensure_active()?;
        if let Some(session) = self.session.as_mut() {
            session.sort = session.sort.toggled();
        }
        let account = self.fetch_current(account_id).await?;
        Ok(self.render(&account))
    }

    /// Re-render the current account
    pub async fn view(&mut self) -> Result<AccountView> {
        let account_id = self.ensure_active()?;
        let account = self.fetch_current(account_id).await?;
        Ok(self.render(&account))
    }

    /// End the session. Returns false if nobody was logged in.
    pub fn logout(&mut self) -> bool {
        if self.session.is_some() {
            self.end_session("logged_out");
            true
        } else {
            false
        }
    }

    fn start_timer(settings: &SessionSettings) -> InactivityTimer {
        InactivityTimer::start(settings.timeout_ticks, settings.tick)
    }

    fn restart_timer(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.timer = Self::start_timer(&self.settings);
        }
    }

    /// Account id of the live session
    fn ensure_active(&mut self) -> Result<Uuid> {
        match &self.session {
            None => Err(Error::NotLoggedIn),
            Some(session) if session.timer.is_expired() => {
                self.end_session("session_expired");
                Err(Error::SessionExpired)
            }
            Some(session) => Ok(session.account_id),
        }
    }

    async fn fetch_current(&mut self, account_id: Uuid) -> Result<Account> {
        match self.repository.get_account_by_id(account_id).await? {
            Some(account) => Ok(account),
            None => {
                self.end_session("session_ended");
                Err(Error::not_found(account_id.to_string()))
            }
        }
    }

    /// Wait out the processing delay unless the countdown ends first
    async fn simulate_processing(&mut self) -> Result<()> {
        let expiry = self.expiry();
        let delay = self.settings.processing_delay;

        tokio::select! {
            biased;
            _ = expiry => {
                self.end_session("session_expired");
                Err(Error::SessionExpired)
            }
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn render(&self, account: &Account) -> AccountView {
        let (sort, time_left) = self
            .session
            .as_ref()
            .map(|s| (s.sort, s.timer.display()))
            .unwrap_or_default();
        view::render(account, sort, self.clock.now(), time_left)
    }

    fn end_session(&mut self, event: &str) {
        self.session = None;
        self.log_event(event);
    }

    /// Log a rejected command without user data and hand the error back
    fn reject<T>(&self, event: &str, reason: &str, error: Error) -> Result<T> {
        if let Some(logger) = &self.logger {
            let _ = logger.log_error(event, reason, None);
        }
        Err(error)
    }

    fn log_event(&self, event: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event);
        }
    }
}
