//! REST API surface for the Spelinx backend.
//!
//! Maps HTTP requests onto the service layer and converts [`AppError`]
//! into `{"error": ...}` JSON responses. Admin routes re-resolve the
//! caller from the database on every request; the token alone is never
//! trusted for privileges.

use crate::auth;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::{
    AuthService, PaymentService, PremiumService, ReferralService, ReviewService, WalletService,
};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod admin;
mod auth_routes;
mod payments;
mod premium;
mod referrals;
mod wallet;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiContext {
    pub auth: Arc<AuthService>,
    pub payments: Arc<PaymentService>,
    pub premium: Arc<PremiumService>,
    pub review: Arc<ReviewService>,
    pub referrals: Arc<ReferralService>,
    pub wallet: Arc<WalletService>,
    pub users: Arc<UserRepository>,
    pub config: Arc<AppConfig>,
}

/// The authenticated caller, resolved from the bearer token and a fresh
/// database read
pub struct CurrentUser(pub User);

/// An authenticated caller verified to hold the admin role
pub struct AdminUser(pub User);

async fn resolve_user(parts: &Parts, ctx: &ApiContext) -> Result<User, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;

    let token = auth::bearer_token(header)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;

    let claims = auth::validate_token(token, &ctx.config.jwt_secret)?;
    let user_id = auth::user_id_from_claims(&claims)?;

    let user = ctx
        .users
        .find_by_id(user_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    if user.is_banned {
        return Err(AppError::Forbidden("Account is banned".to_string()));
    }

    Ok(user)
}

impl FromRequestParts<ApiContext> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ApiContext,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(resolve_user(parts, ctx).await?))
    }
}

impl FromRequestParts<ApiContext> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ApiContext,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_user(parts, ctx).await?;
        if !user.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

/// Build the application router
pub fn router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        // Auth
        .route("/api/auth/signup", post(auth_routes::signup))
        .route("/api/auth/login", post(auth_routes::login))
        .route("/api/user/me", get(auth_routes::me))
        // Payment intake
        .route("/api/payment/submit-deposit", post(payments::submit_deposit))
        .route("/api/payment/deposits", get(payments::my_deposits))
        // Premium
        .route("/api/premium/initiate-payment", post(premium::initiate_payment))
        .route("/api/premium/submit-proof", post(premium::submit_proof))
        .route("/api/premium/proofs", get(premium::my_proofs))
        // Wallet
        .route("/api/wallet", get(wallet::get_wallet))
        .route("/api/wallet/transactions", get(wallet::transactions))
        .route("/api/wallet/daily-claim", post(wallet::daily_claim))
        // Referrals
        .route("/api/referral/code", get(referrals::code))
        .route("/api/referral/use", post(referrals::use_code))
        .route("/api/referral/stats", get(referrals::stats))
        // Admin review
        .route("/api/admin/deposits", get(admin::list_deposits))
        .route("/api/admin/deposits/{id}/approve", post(admin::approve_deposit))
        .route("/api/admin/deposits/{id}/reject", post(admin::reject_deposit))
        .route("/api/admin/premium-payments", get(admin::list_premium_payments))
        .route(
            "/api/admin/premium-payments/{id}/approve",
            post(admin::approve_premium_payment),
        )
        .route(
            "/api/admin/premium-payments/{id}/reject",
            post(admin::reject_premium_payment),
        )
        .route(
            "/api/admin/referrals/{referee_id}/reward",
            post(admin::reward_referral),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
