use crate::error::{AppError, AppResult};
use crate::models::referral::{parse_referral_code, referral_code_for};
use crate::models::Referral;
use crate::repositories::{ReferralRepository, UserRepository};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// INX credited to the referrer when their code is used at signup
pub const REFERRER_REWARD_INX: i64 = 100;

/// INX credited to the new user for signing up with a code
pub const REFEREE_BONUS_INX: i64 = 50;

/// Service resolving referral codes and paying referral rewards
pub struct ReferralService {
    referral_repo: Arc<ReferralRepository>,
    user_repo: Arc<UserRepository>,
}

impl ReferralService {
    pub fn new(referral_repo: Arc<ReferralRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            referral_repo,
            user_repo,
        }
    }

    /// The caller's deterministic referral code
    pub fn code_for(&self, user_id: Uuid) -> String {
        referral_code_for(user_id)
    }

    /// Apply a referral code for a freshly signed-up user.
    ///
    /// Resolves the code to its referrer by user-id suffix, rejects
    /// self-referrals and double attributions, then records the completed
    /// referral and credits both wallets in one database transaction.
    pub async fn use_code(&self, code: &str, new_user_id: Uuid) -> AppResult<Referral> {
        let suffix = parse_referral_code(code)
            .ok_or_else(|| AppError::Validation("Invalid referral code".to_string()))?;

        let referrer = self
            .user_repo
            .find_by_id_suffix(&suffix)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::Validation("Invalid referral code".to_string()))?;

        if referrer.id == new_user_id {
            return Err(AppError::Validation(
                "You cannot use your own referral code".to_string(),
            ));
        }

        if self
            .referral_repo
            .find_by_referee(new_user_id)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(AppError::Conflict(
                "User was already referred".to_string(),
            ));
        }

        let referral = self
            .referral_repo
            .register_completed(
                referrer.id,
                new_user_id,
                Decimal::new(REFERRER_REWARD_INX, 0),
                Decimal::new(REFEREE_BONUS_INX, 0),
            )
            .await
            .map_err(AppError::from)?;

        info!(
            "Referral registered: referrer={}, referee={}",
            referrer.username, new_user_id
        );

        Ok(referral)
    }

    /// Admin-triggered reward for a referral not yet rewarded
    pub async fn reward(&self, referee_id: Uuid) -> AppResult<Referral> {
        let referral = self
            .referral_repo
            .grant_reward(referee_id, Decimal::new(REFERRER_REWARD_INX, 0))
            .await
            .map_err(AppError::from)?;

        info!(
            "Referral reward granted: referrer={}, referee={}",
            referral.referrer_id, referral.referee_id
        );

        Ok(referral)
    }

    /// The caller's referral history
    pub async fn stats(&self, referrer_id: Uuid) -> AppResult<Vec<Referral>> {
        self.referral_repo
            .list_for_referrer(referrer_id)
            .await
            .map_err(AppError::from)
    }
}
