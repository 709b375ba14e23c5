//! Repository for referral attributions and their rewards

use crate::error::RepositoryError;
use crate::models::{Referral, TransactionType};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::wallet_repository::credit_wallet;

const REFERRAL_COLUMNS: &str = "id, referrer_id, referee_id, status, reward_given, created_at";

pub struct ReferralRepository {
    pool: PgPool,
}

impl ReferralRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the referral attributing a given referee, if any
    pub async fn find_by_referee(
        &self,
        referee_id: Uuid,
    ) -> Result<Option<Referral>, RepositoryError> {
        let referral = sqlx::query_as::<_, Referral>(&format!(
            "SELECT {REFERRAL_COLUMNS} FROM referrals WHERE referee_id = $1"
        ))
        .bind(referee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(referral)
    }

    /// List referrals made by a referrer, newest first
    pub async fn list_for_referrer(
        &self,
        referrer_id: Uuid,
    ) -> Result<Vec<Referral>, RepositoryError> {
        let referrals = sqlx::query_as::<_, Referral>(&format!(
            "SELECT {REFERRAL_COLUMNS} FROM referrals \
             WHERE referrer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(referrer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(referrals)
    }

    /// Register a referral and pay both sides their signup rewards.
    ///
    /// One database transaction covers the referral insert and both wallet
    /// credits with their audit records. The unique constraint on
    /// `referee_id` rejects a second attribution of the same referee.
    pub async fn register_completed(
        &self,
        referrer_id: Uuid,
        referee_id: Uuid,
        referrer_reward: Decimal,
        referee_bonus: Decimal,
    ) -> Result<Referral, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let referral = sqlx::query_as::<_, Referral>(&format!(
            "INSERT INTO referrals (referrer_id, referee_id, status, reward_given) \
             VALUES ($1, $2, 'completed', TRUE) \
             RETURNING {REFERRAL_COLUMNS}"
        ))
        .bind(referrer_id)
        .bind(referee_id)
        .fetch_one(&mut *tx)
        .await?;

        credit_wallet(
            &mut tx,
            referrer_id,
            referrer_reward,
            TransactionType::ReferralReward,
            Some("Referral signup reward"),
        )
        .await?;

        credit_wallet(
            &mut tx,
            referee_id,
            referee_bonus,
            TransactionType::ReferralBonus,
            Some("Referred signup bonus"),
        )
        .await?;

        tx.commit().await?;

        Ok(referral)
    }

    /// Grant the admin-triggered reward for a referral that has not been
    /// rewarded yet. Locks the referral row; a second grant fails the
    /// `reward_given` guard, so the two reward paths cannot double-pay.
    pub async fn grant_reward(
        &self,
        referee_id: Uuid,
        referrer_reward: Decimal,
    ) -> Result<Referral, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Referral>(&format!(
            "SELECT {REFERRAL_COLUMNS} FROM referrals WHERE referee_id = $1 FOR UPDATE"
        ))
        .bind(referee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("Referral not found".to_string()))?;

        if current.reward_given {
            return Err(RepositoryError::BusinessRule(
                "Referral reward already granted".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Referral>(&format!(
            "UPDATE referrals SET status = 'completed', reward_given = TRUE \
             WHERE id = $1 \
             RETURNING {REFERRAL_COLUMNS}"
        ))
        .bind(current.id)
        .fetch_one(&mut *tx)
        .await?;

        credit_wallet(
            &mut tx,
            current.referrer_id,
            referrer_reward,
            TransactionType::ReferralReward,
            Some("Referral reward"),
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
