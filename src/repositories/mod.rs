pub mod deposit_repository;
pub mod premium_repository;
pub mod referral_repository;
pub mod user_repository;
pub mod wallet_repository;

// Re-export all repositories for convenient access
pub use deposit_repository::{DepositAdminRow, DepositRepository};
pub use premium_repository::{PremiumProofAdminRow, PremiumRepository};
pub use referral_repository::ReferralRepository;
pub use user_repository::UserRepository;
pub use wallet_repository::WalletRepository;
