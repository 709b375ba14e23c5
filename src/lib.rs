//! Spelinx Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repositories::*;
use std::sync::Arc;

/// Application state containing all repositories
pub struct AppState {
    pub user_repo: Arc<UserRepository>,
    pub wallet_repo: Arc<WalletRepository>,
    pub deposit_repo: Arc<DepositRepository>,
    pub premium_repo: Arc<PremiumRepository>,
    pub referral_repo: Arc<ReferralRepository>,
}

impl AppState {
    /// Create a new AppState with initialized repositories
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            wallet_repo: Arc::new(WalletRepository::new(pool.clone())),
            deposit_repo: Arc::new(DepositRepository::new(pool.clone())),
            premium_repo: Arc::new(PremiumRepository::new(pool.clone())),
            referral_repo: Arc::new(ReferralRepository::new(pool)),
        }
    }
}
