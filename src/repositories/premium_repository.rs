//! Repository for premium payment proofs and subscription activation

use crate::error::RepositoryError;
use crate::models::{PlanType, PremiumPaymentProof, TransactionType, User};
use chrono::{Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::wallet_repository::{append_audit, lock_or_create_wallet};

const PROOF_COLUMNS: &str = "id, user_id, transaction_id, plan_type, amount, proof_image, \
                             status, admin_notes, reviewed_by, reviewed_at, created_at";

const USER_COLUMNS: &str = "id, username, email, password_hash, password_salt, is_admin, \
                            is_banned, is_premium, premium_expires_at, premium_type, created_at";

/// Proof row joined with the submitting user, for the admin listing
#[derive(Debug, Clone, serde::Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PremiumProofAdminRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub transaction_id: String,
    pub plan_type: String,
    pub amount: Decimal,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: NaiveDateTime,
}

pub struct PremiumRepository {
    pool: PgPool,
}

impl PremiumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new pending payment proof
    pub async fn create(
        &self,
        user_id: Uuid,
        transaction_id: &str,
        plan: PlanType,
        proof_image: &str,
    ) -> Result<PremiumPaymentProof, RepositoryError> {
        let proof = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "INSERT INTO premium_payment_proofs \
             (user_id, transaction_id, plan_type, amount, proof_image) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PROOF_COLUMNS}"
        ))
        .bind(user_id)
        .bind(transaction_id)
        .bind(plan.as_str())
        .bind(plan.price_inx())
        .bind(proof_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(proof)
    }

    /// Find a proof by id
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PremiumPaymentProof>, RepositoryError> {
        let proof = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "SELECT {PROOF_COLUMNS} FROM premium_payment_proofs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(proof)
    }

    /// Find a non-rejected proof carrying the given transaction reference
    pub async fn find_active_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PremiumPaymentProof>, RepositoryError> {
        let proof = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "SELECT {PROOF_COLUMNS} FROM premium_payment_proofs \
             WHERE transaction_id = $1 AND status <> 'rejected'"
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(proof)
    }

    /// List a user's proofs, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PremiumPaymentProof>, RepositoryError> {
        let proofs = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "SELECT {PROOF_COLUMNS} FROM premium_payment_proofs \
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(proofs)
    }

    /// Paginated admin listing with optional status filter and search
    pub async fn list_paginated(
        &self,
        status: Option<&str>,
        search: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<PremiumProofAdminRow>, i64), RepositoryError> {
        let offset = (page - 1) * limit;

        let rows = sqlx::query_as::<_, PremiumProofAdminRow>(
            "SELECT p.id, p.user_id, u.username, p.transaction_id, p.plan_type, \
                    p.amount, p.status, p.admin_notes, p.created_at \
             FROM premium_payment_proofs p \
             JOIN users u ON u.id = p.user_id \
             WHERE ($1::text IS NULL OR p.status = $1) \
               AND ($2::text IS NULL \
                    OR p.transaction_id ILIKE '%' || $2 || '%' \
                    OR u.username ILIKE '%' || $2 || '%') \
             ORDER BY p.created_at DESC \
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
             FROM premium_payment_proofs p \
             JOIN users u ON u.id = p.user_id \
             WHERE ($1::text IS NULL OR p.status = $1) \
               AND ($2::text IS NULL \
                    OR p.transaction_id ILIKE '%' || $2 || '%' \
                    OR u.username ILIKE '%' || $2 || '%')",
        )
        .bind(status)
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Approve a pending payment proof and activate the subscription.
    ///
    /// One database transaction covers the status flip, the premium
    /// extension on the user row and the audit-log append. When the user
    /// still holds an unexpired subscription the new duration stacks on
    /// the existing expiry; otherwise it starts from now.
    pub async fn approve(
        &self,
        id: Uuid,
        reviewer_id: Uuid,
        notes: Option<&str>,
    ) -> Result<(PremiumPaymentProof, User), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "SELECT {PROOF_COLUMNS} FROM premium_payment_proofs WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("Payment proof not found".to_string()))?;

        if !current.review_status().is_pending() {
            return Err(RepositoryError::BusinessRule(format!(
                "Payment proof already {}",
                current.status
            )));
        }

        let plan = current
            .plan()
            .map_err(RepositoryError::InvalidInput)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(current.user_id)
        .fetch_one(&mut *tx)
        .await?;

        let now = Utc::now().naive_utc();
        let base = match user.premium_expires_at {
            // Still active: stack the new duration on the existing expiry
            Some(expiry) if user.is_premium && expiry > now => expiry,
            _ => now,
        };
        let new_expiry = base + Duration::days(plan.duration_days());

        let updated_user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users \
             SET is_premium = TRUE, premium_expires_at = $2, premium_type = $3 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(current.user_id)
        .bind(new_expiry)
        .bind(plan.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let updated_proof = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "UPDATE premium_payment_proofs \
             SET status = 'approved', reviewed_by = $2, reviewed_at = NOW(), admin_notes = $3 \
             WHERE id = $1 \
             RETURNING {PROOF_COLUMNS}"
        ))
        .bind(id)
        .bind(reviewer_id)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        // Premium purchases do not move the INX balance; the audit record
        // still captures the purchase against the current balance.
        let wallet = lock_or_create_wallet(&mut tx, current.user_id).await?;
        append_audit(
            &mut tx,
            current.user_id,
            TransactionType::PremiumPurchase,
            current.amount,
            wallet.inx,
            wallet.inx,
            Some(&format!("{} activated", plan.display_name())),
        )
        .await?;

        tx.commit().await?;

        Ok((updated_proof, updated_user))
    }

    /// Reject a pending payment proof. Terminal, no premium mutation.
    pub async fn reject(
        &self,
        id: Uuid,
        reviewer_id: Uuid,
        notes: &str,
    ) -> Result<PremiumPaymentProof, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "SELECT {PROOF_COLUMNS} FROM premium_payment_proofs WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("Payment proof not found".to_string()))?;

        if !current.review_status().is_pending() {
            return Err(RepositoryError::BusinessRule(format!(
                "Payment proof already {}",
                current.status
            )));
        }

        let updated = sqlx::query_as::<_, PremiumPaymentProof>(&format!(
            "UPDATE premium_payment_proofs \
             SET status = 'rejected', reviewed_by = $2, reviewed_at = NOW(), admin_notes = $3 \
             WHERE id = $1 \
             RETURNING {PROOF_COLUMNS}"
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
