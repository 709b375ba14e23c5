//! Repository for wallet and transaction-log operations

use crate::error::RepositoryError;
use crate::models::wallet::level_for_xp;
use crate::models::{Transaction, TransactionType, Wallet};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const WALLET_COLUMNS: &str = "user_id, inx, xp, level, last_check_in, updated_at";

pub struct WalletRepository {
    pool: PgPool,
}

/// Lock a user's wallet row for update, creating it with zero balances
/// if it does not exist yet. Must run inside an open transaction.
pub(crate) async fn lock_or_create_wallet(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Wallet, RepositoryError> {
    let existing = sqlx::query_as::<_, Wallet>(&format!(
        "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(wallet) = existing {
        return Ok(wallet);
    }

    let wallet = sqlx::query_as::<_, Wallet>(&format!(
        "INSERT INTO wallets (user_id) VALUES ($1) \
         ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW() \
         RETURNING {WALLET_COLUMNS}"
    ))
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(wallet)
}

/// Append an immutable audit record. Must run inside the same transaction
/// as the wallet mutation it describes.
pub(crate) async fn append_audit(
    conn: &mut PgConnection,
    user_id: Uuid,
    tx_type: TransactionType,
    amount: Decimal,
    balance_before: Decimal,
    balance_after: Decimal,
    description: Option<&str>,
) -> Result<(), RepositoryError> {
    sqlx::query(
        "INSERT INTO transactions \
         (user_id, tx_type, amount, balance_before, balance_after, description) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user_id)
    .bind(tx_type.as_str())
    .bind(amount)
    .bind(balance_before)
    .bind(balance_after)
    .bind(description)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Credit INX to a locked wallet and append the matching audit record.
/// Must run inside an open transaction so the balance update and the log
/// entry commit or roll back together.
pub(crate) async fn credit_wallet(
    conn: &mut PgConnection,
    user_id: Uuid,
    amount: Decimal,
    tx_type: TransactionType,
    description: Option<&str>,
) -> Result<Wallet, RepositoryError> {
    let current = lock_or_create_wallet(&mut *conn, user_id).await?;
    let balance_before = current.inx;
    let balance_after = balance_before + amount;

    let updated = sqlx::query_as::<_, Wallet>(&format!(
        "UPDATE wallets SET inx = $2, updated_at = NOW() \
         WHERE user_id = $1 \
         RETURNING {WALLET_COLUMNS}"
    ))
    .bind(user_id)
    .bind(balance_after)
    .fetch_one(&mut *conn)
    .await?;

    append_audit(
        &mut *conn,
        user_id,
        tx_type,
        amount,
        balance_before,
        balance_after,
        description,
    )
    .await?;

    Ok(updated)
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's wallet, creating it with zero balances on first access
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<Wallet, RepositoryError> {
        let existing = sqlx::query_as::<_, Wallet>(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(wallet) = existing {
            return Ok(wallet);
        }

        let wallet = sqlx::query_as::<_, Wallet>(&format!(
            "INSERT INTO wallets (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW() \
             RETURNING {WALLET_COLUMNS}"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(wallet)
    }

    /// Credit INX to a user's wallet together with its audit record
    pub async fn credit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        tx_type: TransactionType,
        description: Option<&str>,
    ) -> Result<Wallet, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let wallet = credit_wallet(&mut tx, user_id, amount, tx_type, description).await?;
        tx.commit().await?;
        Ok(wallet)
    }

    /// Claim the daily check-in reward. Fails with a business-rule error
    /// when the wallet was already checked in on `today`.
    pub async fn claim_daily(
        &self,
        user_id: Uuid,
        inx_reward: Decimal,
        xp_reward: i64,
        today: NaiveDate,
    ) -> Result<Wallet, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = lock_or_create_wallet(&mut tx, user_id).await?;
        if current.claimed_on(today) {
            return Err(RepositoryError::BusinessRule(
                "Daily reward already claimed today".to_string(),
            ));
        }

        let balance_before = current.inx;
        let balance_after = balance_before + inx_reward;
        let new_xp = current.xp + xp_reward;

        let updated = sqlx::query_as::<_, Wallet>(&format!(
            "UPDATE wallets \
             SET inx = $2, xp = $3, level = $4, last_check_in = $5, updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {WALLET_COLUMNS}"
        ))
        .bind(user_id)
        .bind(balance_after)
        .bind(new_xp)
        .bind(level_for_xp(new_xp))
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        append_audit(
            &mut tx,
            user_id,
            TransactionType::DailyClaim,
            inx_reward,
            balance_before,
            balance_after,
            Some("Daily check-in reward"),
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Get transaction history for a user, newest first
    pub async fn get_user_transactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT id, user_id, tx_type, amount, balance_before, balance_after, \
                    description, created_at \
             FROM transactions \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
