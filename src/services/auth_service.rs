use crate::auth;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::{UserRepository, WalletRepository};
use crate::services::ReferralService;
use std::sync::Arc;
use tracing::{info, warn};

/// Signup and login over email/password credentials
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    wallet_repo: Arc<WalletRepository>,
    referral_service: Arc<ReferralService>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        wallet_repo: Arc<WalletRepository>,
        referral_service: Arc<ReferralService>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            user_repo,
            wallet_repo,
            referral_service,
            config,
        }
    }

    /// Create an account and return the user with a fresh bearer token.
    ///
    /// A supplied referral code is applied after the account exists; an
    /// invalid code does not fail the signup, it is logged and skipped.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        referral_code: Option<&str>,
    ) -> AppResult<(User, String)> {
        let username = username.trim();
        let email = email.trim();

        if username.len() < 3 {
            return Err(AppError::Validation(
                "Username must be at least 3 characters".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }
        if password.len() < 6 {
            return Err(AppError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
        if self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let salt = auth::generate_salt();
        let hash = auth::hash_password(password, &salt);

        let user = self
            .user_repo
            .create(username, email, &hash, &salt)
            .await
            .map_err(AppError::from)?;

        self.wallet_repo
            .get_or_create(user.id)
            .await
            .map_err(AppError::from)?;

        if let Some(code) = referral_code.filter(|c| !c.trim().is_empty()) {
            if let Err(e) = self.referral_service.use_code(code, user.id).await {
                warn!("Referral code rejected at signup for {}: {}", username, e);
            }
        }

        let token = auth::create_token(user.id, &self.config.jwt_secret, self.config.jwt_expiry_secs)?;

        info!("User signed up: {}", username);

        Ok((user, token))
    }

    /// Verify credentials and return the user with a fresh bearer token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, String)> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !auth::verify_password(password, &user.password_salt, &user.password_hash) {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if user.is_banned {
            return Err(AppError::Forbidden("Account is banned".to_string()));
        }

        let token = auth::create_token(user.id, &self.config.jwt_secret, self.config.jwt_expiry_secs)?;

        info!("User logged in: {}", user.username);

        Ok((user, token))
    }
}
