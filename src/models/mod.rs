//! Domain models for the Spelinx backend.
//!
//! This module contains all database-backed models representing
//! the core entities of the gaming platform.

pub mod deposit;
pub mod premium;
pub mod referral;
pub mod transaction;
pub mod user;
pub mod wallet;

// Re-export all models for convenient access
pub use deposit::{Deposit, ReviewStatus};
pub use premium::{PlanType, PremiumPaymentProof};
pub use referral::{Referral, ReferralStatus};
pub use transaction::{Transaction, TransactionType};
pub use user::User;
pub use wallet::Wallet;
