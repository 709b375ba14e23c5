use crate::error::{AppError, AppResult};
use crate::models::Deposit;
use crate::repositories::DepositRepository;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Minimum accepted deposit, in INR
pub const MIN_DEPOSIT_INR: i64 = 10;

/// A user may not hold more than this many deposits awaiting review
pub const MAX_PENDING_DEPOSITS: i64 = 3;

/// Typed validation failures for payment intake
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Deposit amount must be at least ₹{MIN_DEPOSIT_INR}")]
    InvalidAmount,

    #[error("Transaction reference already submitted")]
    DuplicateReference,

    #[error("Too many deposits pending review")]
    TooManyPending,

    #[error("Payment proof screenshot is required")]
    MissingProof,
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::DuplicateReference => AppError::Conflict(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

/// Service accepting claimed UPI payments and recording them for review
pub struct PaymentService {
    deposit_repo: Arc<DepositRepository>,
}

impl PaymentService {
    pub fn new(deposit_repo: Arc<DepositRepository>) -> Self {
        Self { deposit_repo }
    }

    /// Record a claimed deposit as pending.
    ///
    /// Validates amount, reference uniqueness, the per-user pending cap
    /// and proof presence before inserting; nothing is persisted on
    /// failure and the wallet is never touched here.
    pub async fn submit_deposit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        txn_id: &str,
        screenshot: Option<&str>,
    ) -> AppResult<Deposit> {
        let screenshot = match screenshot {
            Some(s) if !s.is_empty() => s,
            _ => return Err(IntakeError::MissingProof.into()),
        };

        if amount < Decimal::new(MIN_DEPOSIT_INR, 0) {
            return Err(IntakeError::InvalidAmount.into());
        }

        let txn_id = txn_id.trim();
        if txn_id.is_empty() {
            return Err(AppError::Validation(
                "Transaction reference is required".to_string(),
            ));
        }

        if self
            .deposit_repo
            .find_active_by_txn_id(txn_id)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(IntakeError::DuplicateReference.into());
        }

        let pending = self
            .deposit_repo
            .count_pending_for_user(user_id)
            .await
            .map_err(AppError::from)?;
        if pending >= MAX_PENDING_DEPOSITS {
            return Err(IntakeError::TooManyPending.into());
        }

        let deposit = self
            .deposit_repo
            .create(user_id, amount, txn_id, screenshot)
            .await
            .map_err(AppError::from)?;

        info!(
            "Deposit submitted: user={}, amount={}, txn_id={}",
            user_id, amount, txn_id
        );

        Ok(deposit)
    }

    /// The caller's own deposit history
    pub async fn user_deposits(&self, user_id: Uuid) -> AppResult<Vec<Deposit>> {
        self.deposit_repo
            .list_for_user(user_id)
            .await
            .map_err(AppError::from)
    }
}
