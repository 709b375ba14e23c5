//! Spelinx Backend Service
//!
//! Main entry point for the Spelinx gaming platform backend.
//! This service provides the REST API for auth, wallets, deposit
//! verification, premium subscriptions, referrals and the admin
//! review surface.

use anyhow::{anyhow, Context};
use spelinx_backend::api::{self, ApiContext};
use spelinx_backend::config::AppConfig;
use spelinx_backend::database::{create_pool, run_migrations};
use spelinx_backend::services::{
    AuthService, PaymentService, PremiumService, ReferralService, ReviewService, WalletService,
};
use spelinx_backend::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| anyhow!("Configuration error: {}", e))?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("spelinx_backend={},sqlx=warn,tower_http=info", config.log_level).into()
            }),
        )
        .init();

    info!("Spelinx backend starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    // Run migrations
    info!("Running database migrations...");
    run_migrations(&pool, None)
        .await
        .context("Database migration failed")?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // SERVICES
    // =========================================================================
    let state = Arc::new(AppState::new(pool));
    let config = Arc::new(config);

    let referrals = Arc::new(ReferralService::new(
        state.referral_repo.clone(),
        state.user_repo.clone(),
    ));

    let ctx = ApiContext {
        auth: Arc::new(AuthService::new(
            state.user_repo.clone(),
            state.wallet_repo.clone(),
            referrals.clone(),
            config.clone(),
        )),
        payments: Arc::new(PaymentService::new(state.deposit_repo.clone())),
        premium: Arc::new(PremiumService::new(
            state.premium_repo.clone(),
            config.clone(),
        )),
        review: Arc::new(ReviewService::new(
            state.deposit_repo.clone(),
            state.premium_repo.clone(),
        )),
        referrals,
        wallet: Arc::new(WalletService::new(state.wallet_repo.clone())),
        users: state.user_repo.clone(),
        config: config.clone(),
    };

    // =========================================================================
    // HTTP SERVER
    // =========================================================================
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, api::router(ctx))
        .await
        .context("Server error")?;

    Ok(())
}
