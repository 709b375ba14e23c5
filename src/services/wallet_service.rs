use crate::error::{AppError, AppResult};
use crate::models::{Transaction, Wallet};
use crate::repositories::WalletRepository;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// INX granted by the daily check-in
pub const DAILY_CLAIM_INX: i64 = 25;

/// XP granted by the daily check-in
pub const DAILY_CLAIM_XP: i64 = 50;

const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

/// Read and claim operations over per-user wallets
pub struct WalletService {
    wallet_repo: Arc<WalletRepository>,
}

impl WalletService {
    pub fn new(wallet_repo: Arc<WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    /// The caller's wallet, created with zero balances on first access
    pub async fn get_wallet(&self, user_id: Uuid) -> AppResult<Wallet> {
        self.wallet_repo
            .get_or_create(user_id)
            .await
            .map_err(AppError::from)
    }

    /// Recent audit records for the caller, newest first
    pub async fn transactions(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<Transaction>> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        self.wallet_repo
            .get_user_transactions(user_id, limit)
            .await
            .map_err(AppError::from)
    }

    /// Claim the daily check-in reward; one claim per UTC calendar day
    pub async fn daily_claim(&self, user_id: Uuid) -> AppResult<Wallet> {
        let today = chrono::Utc::now().date_naive();

        let wallet = self
            .wallet_repo
            .claim_daily(
                user_id,
                Decimal::new(DAILY_CLAIM_INX, 0),
                DAILY_CLAIM_XP,
                today,
            )
            .await
            .map_err(AppError::from)?;

        info!("Daily reward claimed: user={}, balance={}", user_id, wallet.inx);

        Ok(wallet)
    }
}
