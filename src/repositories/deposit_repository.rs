//! Repository for deposit records and their review transitions

use crate::error::RepositoryError;
use crate::models::{Deposit, TransactionType};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::wallet_repository::credit_wallet;

const DEPOSIT_COLUMNS: &str = "id, user_id, amount, txn_id, screenshot, status, \
                               admin_notes, reviewed_by, reviewed_at, created_at";

/// Deposit row joined with the submitting user, for the admin listing
#[derive(Debug, Clone, serde::Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DepositAdminRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub amount: Decimal,
    pub txn_id: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

pub struct DepositRepository {
    pool: PgPool,
}

impl DepositRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new pending deposit claim
    pub async fn create(
        &self,
        user_id: Uuid,
        amount: Decimal,
        txn_id: &str,
        screenshot: &str,
    ) -> Result<Deposit, RepositoryError> {
        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            "INSERT INTO deposits (user_id, amount, txn_id, screenshot) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {DEPOSIT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(amount)
        .bind(txn_id)
        .bind(screenshot)
        .fetch_one(&self.pool)
        .await?;

        Ok(deposit)
    }

    /// Find a deposit by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Deposit>, RepositoryError> {
        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deposit)
    }

    /// Find a non-rejected deposit carrying the given transaction reference.
    /// Rejected records free their reference for resubmission.
    pub async fn find_active_by_txn_id(
        &self,
        txn_id: &str,
    ) -> Result<Option<Deposit>, RepositoryError> {
        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits \
             WHERE txn_id = $1 AND status <> 'rejected'"
        ))
        .bind(txn_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deposit)
    }

    /// Count a user's deposits still awaiting review
    pub async fn count_pending_for_user(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM deposits WHERE user_id = $1 AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// List a user's deposits, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Deposit>, RepositoryError> {
        let deposits = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits \
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(deposits)
    }

    /// Paginated admin listing with optional status filter and a search
    /// over transaction reference and username
    pub async fn list_paginated(
        &self,
        status: Option<&str>,
        search: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<DepositAdminRow>, i64), RepositoryError> {
        let offset = (page - 1) * limit;

        let rows = sqlx::query_as::<_, DepositAdminRow>(
            "SELECT d.id, d.user_id, u.username, d.amount, d.txn_id, d.status, \
                    d.admin_notes, d.created_at \
             FROM deposits d \
             JOIN users u ON u.id = d.user_id \
             WHERE ($1::text IS NULL OR d.status = $1) \
               AND ($2::text IS NULL \
                    OR d.txn_id ILIKE '%' || $2 || '%' \
                    OR u.username ILIKE '%' || $2 || '%') \
             ORDER BY d.created_at DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(status)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) \
             FROM deposits d \
             JOIN users u ON u.id = d.user_id \
             WHERE ($1::text IS NULL OR d.status = $1) \
               AND ($2::text IS NULL \
                    OR d.txn_id ILIKE '%' || $2 || '%' \
                    OR u.username ILIKE '%' || $2 || '%')",
        )
        .bind(status)
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Approve a pending deposit.
    ///
    /// Runs as a single database transaction: the record is locked and
    /// re-checked, the status flipped, the wallet credited 1:1 with the
    /// INR amount and the audit record appended. A concurrent second
    /// approval blocks on the row lock and then fails the status guard,
    /// so the wallet can never be credited twice.
    pub async fn approve(
        &self,
        id: Uuid,
        reviewer_id: Uuid,
        notes: Option<&str>,
    ) -> Result<Deposit, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("Deposit not found".to_string()))?;

        if !current.review_status().is_pending() {
            return Err(RepositoryError::BusinessRule(format!(
                "Deposit already {}",
                current.status
            )));
        }

        let updated = sqlx::query_as::<_, Deposit>(&format!(
            "UPDATE deposits \
             SET status = 'approved', reviewed_by = $2, reviewed_at = NOW(), admin_notes = $3 \
             WHERE id = $1 \
             RETURNING {DEPOSIT_COLUMNS}"
        ))
        .bind(id)
        .bind(reviewer_id)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        credit_wallet(
            &mut tx,
            current.user_id,
            current.amount,
            TransactionType::Deposit,
            Some(&format!("Deposit {} approved", current.txn_id)),
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Reject a pending deposit. Terminal, no wallet mutation.
    pub async fn reject(
        &self,
        id: Uuid,
        reviewer_id: Uuid,
        notes: &str,
    ) -> Result<Deposit, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("Deposit not found".to_string()))?;

        if !current.review_status().is_pending() {
            return Err(RepositoryError::BusinessRule(format!(
                "Deposit already {}",
                current.status
            )));
        }

        let updated = sqlx::query_as::<_, Deposit>(&format!(
            "UPDATE deposits \
             SET status = 'rejected', reviewed_by = $2, reviewed_at = NOW(), admin_notes = $3 \
             WHERE id = $1 \
             RETURNING {DEPOSIT_COLUMNS}"
        ))
        .bind(id)
        .bind(reviewer_id)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
