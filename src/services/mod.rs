pub mod auth_service;
pub mod payment_service;
pub mod premium_service;
pub mod referral_service;
pub mod review_service;
pub mod wallet_service;

pub use auth_service::AuthService;
pub use payment_service::PaymentService;
pub use premium_service::PremiumService;
pub use referral_service::ReferralService;
pub use review_service::ReviewService;
pub use wallet_service::WalletService;
