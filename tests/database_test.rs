mod helpers;

use chrono::{Duration, Utc};
use helpers::TestDatabase;
use rust_decimal::Decimal;
use spelinx_backend::error::RepositoryError;
use spelinx_backend::models::{PlanType, ReviewStatus, TransactionType};
use spelinx_backend::services::payment_service::{PaymentService, MAX_PENDING_DEPOSITS};
use std::sync::Arc;

// These tests run against a real Postgres. Point TEST_DATABASE_URL at a
// scratch database and run with `cargo test -- --ignored`.

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_deposit_approval_credits_wallet_once() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let admin = db.create_admin().await;

    let deposit = db
        .deposit_repo
        .create(user.id, Decimal::new(500, 0), "UTR-001", "uploads/proof.png")
        .await
        .unwrap();
    assert_eq!(deposit.review_status(), ReviewStatus::Pending);

    let approved = db
        .deposit_repo
        .approve(deposit.id, admin.id, Some("verified against bank feed"))
        .await
        .unwrap();
    assert_eq!(approved.review_status(), ReviewStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(admin.id));

    // 1 INR buys 1 INX
    let wallet = db.wallet_repo.get_or_create(user.id).await.unwrap();
    assert_eq!(wallet.inx, Decimal::new(500, 0));

    let txs = db
        .wallet_repo
        .get_user_transactions(user.id, 10)
        .await
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].tx_type, TransactionType::Deposit.as_str());
    assert_eq!(txs[0].balance_after, Decimal::new(500, 0));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_deposit_cannot_be_approved_twice() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let admin = db.create_admin().await;

    let deposit = db
        .deposit_repo
        .create(user.id, Decimal::new(100, 0), "UTR-002", "uploads/proof.png")
        .await
        .unwrap();

    db.deposit_repo
        .approve(deposit.id, admin.id, None)
        .await
        .unwrap();

    let second = db.deposit_repo.approve(deposit.id, admin.id, None).await;
    assert!(matches!(second, Err(RepositoryError::BusinessRule(_))));

    // Wallet holds exactly one credit
    let wallet = db.wallet_repo.get_or_create(user.id).await.unwrap();
    assert_eq!(wallet.inx, Decimal::new(100, 0));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_rejected_deposit_never_credits_and_frees_the_reference() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let admin = db.create_admin().await;

    let deposit = db
        .deposit_repo
        .create(user.id, Decimal::new(100, 0), "UTR-003", "uploads/proof.png")
        .await
        .unwrap();

    let rejected = db
        .deposit_repo
        .reject(deposit.id, admin.id, "screenshot does not match amount")
        .await
        .unwrap();
    assert_eq!(rejected.review_status(), ReviewStatus::Rejected);

    let wallet = db.wallet_repo.get_or_create(user.id).await.unwrap();
    assert_eq!(wallet.inx, Decimal::ZERO);

    // A rejected claim no longer holds the transaction reference
    let resubmitted = db
        .deposit_repo
        .create(user.id, Decimal::new(100, 0), "UTR-003", "uploads/proof2.png")
        .await;
    assert!(resubmitted.is_ok());

    // Approving a rejected deposit is refused
    let late = db.deposit_repo.approve(deposit.id, admin.id, None).await;
    assert!(matches!(late, Err(RepositoryError::BusinessRule(_))));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_duplicate_transaction_reference_is_rejected() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let other = db.create_user().await;

    db.deposit_repo
        .create(user.id, Decimal::new(100, 0), "UTR-004", "uploads/proof.png")
        .await
        .unwrap();

    // Same reference, even from another user, violates the active-claim index
    let duplicate = db
        .deposit_repo
        .create(other.id, Decimal::new(100, 0), "UTR-004", "uploads/proof.png")
        .await;
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_pending_deposit_cap() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let service = PaymentService::new(db.deposit_repo.clone());

    for i in 0..MAX_PENDING_DEPOSITS {
        service
            .submit_deposit(
                user.id,
                Decimal::new(100, 0),
                &format!("UTR-CAP-{i}"),
                Some("uploads/proof.png"),
            )
            .await
            .unwrap();
    }

    let over = service
        .submit_deposit(
            user.id,
            Decimal::new(100, 0),
            "UTR-CAP-OVER",
            Some("uploads/proof.png"),
        )
        .await;
    assert!(over.is_err());
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_premium_approval_activates_subscription() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let admin = db.create_admin().await;

    let proof = db
        .premium_repo
        .create(user.id, "SPX-PREM-0001", PlanType::Monthly, "uploads/prem.png")
        .await
        .unwrap();
    assert_eq!(proof.amount, PlanType::Monthly.price_inx());

    let (approved, updated) = db
        .premium_repo
        .approve(proof.id, admin.id, None)
        .await
        .unwrap();
    assert_eq!(approved.review_status(), ReviewStatus::Approved);
    assert!(updated.is_premium);
    assert_eq!(updated.premium_type.as_deref(), Some("monthly"));

    let expires = updated.premium_expires_at.unwrap();
    let expected = Utc::now().naive_utc() + Duration::days(30);
    assert!((expires - expected).num_minutes().abs() < 5);
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_premium_renewal_stacks_on_current_expiry() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let admin = db.create_admin().await;

    let first = db
        .premium_repo
        .create(user.id, "SPX-PREM-0002", PlanType::Monthly, "uploads/a.png")
        .await
        .unwrap();
    db.premium_repo.approve(first.id, admin.id, None).await.unwrap();

    let second = db
        .premium_repo
        .create(user.id, "SPX-PREM-0003", PlanType::Monthly, "uploads/b.png")
        .await
        .unwrap();
    let (_, updated) = db
        .premium_repo
        .approve(second.id, admin.id, None)
        .await
        .unwrap();

    // Two back-to-back monthly approvals extend roughly 60 days out
    let expires = updated.premium_expires_at.unwrap();
    let expected = Utc::now().naive_utc() + Duration::days(60);
    assert!((expires - expected).num_minutes().abs() < 5);
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_premium_proof_cannot_be_approved_twice() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let admin = db.create_admin().await;

    let proof = db
        .premium_repo
        .create(user.id, "SPX-PREM-0004", PlanType::Yearly, "uploads/a.png")
        .await
        .unwrap();
    db.premium_repo.approve(proof.id, admin.id, None).await.unwrap();

    let second = db.premium_repo.approve(proof.id, admin.id, None).await;
    assert!(matches!(second, Err(RepositoryError::BusinessRule(_))));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_referral_pays_both_sides_exactly_once() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let referrer = db.create_user().await;
    let referee = db.create_user().await;

    let referral = db
        .referral_repo
        .register_completed(
            referrer.id,
            referee.id,
            Decimal::new(100, 0),
            Decimal::new(50, 0),
        )
        .await
        .unwrap();
    assert!(referral.reward_given);

    let referrer_wallet = db.wallet_repo.get_or_create(referrer.id).await.unwrap();
    let referee_wallet = db.wallet_repo.get_or_create(referee.id).await.unwrap();
    assert_eq!(referrer_wallet.inx, Decimal::new(100, 0));
    assert_eq!(referee_wallet.inx, Decimal::new(50, 0));

    // A referee can only ever be attributed once
    let other = db.create_user().await;
    let again = db
        .referral_repo
        .register_completed(
            other.id,
            referee.id,
            Decimal::new(100, 0),
            Decimal::new(50, 0),
        )
        .await;
    assert!(matches!(again, Err(RepositoryError::Duplicate(_))));

    // The admin reward path sees reward_given and refuses to double-pay
    let manual = db
        .referral_repo
        .grant_reward(referee.id, Decimal::new(100, 0))
        .await;
    assert!(matches!(manual, Err(RepositoryError::BusinessRule(_))));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_daily_claim_is_once_per_day() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;
    let today = Utc::now().date_naive();

    let wallet = db
        .wallet_repo
        .claim_daily(user.id, Decimal::new(25, 0), 50, today)
        .await
        .unwrap();
    assert_eq!(wallet.inx, Decimal::new(25, 0));
    assert_eq!(wallet.xp, 50);
    assert_eq!(wallet.last_check_in, Some(today));

    let again = db
        .wallet_repo
        .claim_daily(user.id, Decimal::new(25, 0), 50, today)
        .await;
    assert!(matches!(again, Err(RepositoryError::BusinessRule(_))));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_wallet_transactions_are_newest_first() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let user = db.create_user().await;

    for i in 1..=3 {
        db.wallet_repo
            .credit(
                user.id,
                Decimal::new(i * 10, 0),
                TransactionType::Deposit,
                Some("seed"),
            )
            .await
            .unwrap();
    }

    let txs = db
        .wallet_repo
        .get_user_transactions(user.id, 2)
        .await
        .unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount, Decimal::new(30, 0));
    assert!(txs[0].created_at >= txs[1].created_at);
}

fn auth_service(db: &TestDatabase) -> spelinx_backend::services::AuthService {
    use spelinx_backend::services::{AuthService, ReferralService};
    use spelinx_backend::AppConfig;

    let referrals = Arc::new(ReferralService::new(
        db.referral_repo.clone(),
        db.user_repo.clone(),
    ));

    AuthService::new(
        db.user_repo.clone(),
        db.wallet_repo.clone(),
        referrals,
        Arc::new(AppConfig::default()),
    )
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_signup_with_bad_referral_code_still_creates_the_user() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let auth = auth_service(&db);

    let (user, token) = auth
        .signup(
            "newplayer",
            "newplayer@example.com",
            "password1",
            Some("SPELINXZZZZZZ"),
        )
        .await
        .unwrap();
    assert!(!token.is_empty());

    // The account and wallet exist, the garbage code was skipped
    let wallet = db.wallet_repo.get_or_create(user.id).await.unwrap();
    assert_eq!(wallet.inx, Decimal::ZERO);

    let referral = db.referral_repo.find_by_referee(user.id).await.unwrap();
    assert!(referral.is_none());
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_signup_with_valid_referral_code_pays_both_sides() {
    let db = TestDatabase::new().await;
    db.cleanup().await;

    let referrer = db.create_user().await;
    let auth = auth_service(&db);

    let code = spelinx_backend::models::referral::referral_code_for(referrer.id);
    let (user, _) = auth
        .signup("referred", "referred@example.com", "password1", Some(&code))
        .await
        .unwrap();

    let referral = db
        .referral_repo
        .find_by_referee(user.id)
        .await
        .unwrap()
        .expect("referral row");
    assert_eq!(referral.referrer_id, referrer.id);
    assert!(referral.reward_given);

    let referee_wallet = db.wallet_repo.get_or_create(user.id).await.unwrap();
    assert_eq!(referee_wallet.inx, Decimal::new(50, 0));
}

#[tokio::test]
#[ignore = "requires a Postgres at TEST_DATABASE_URL"]
async fn test_login_rejects_bad_password_and_banned_account() {
    use spelinx_backend::AppError;

    let db = TestDatabase::new().await;
    db.cleanup().await;

    let auth = auth_service(&db);

    auth.signup("banme", "banme@example.com", "password1", None)
        .await
        .unwrap();

    let wrong = auth.login("banme@example.com", "wrongpass").await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    // Correct credentials work until the ban lands
    auth.login("banme@example.com", "password1").await.unwrap();

    sqlx::query("UPDATE users SET is_banned = TRUE WHERE email = $1")
        .bind("banme@example.com")
        .execute(&db.pool)
        .await
        .unwrap();

    let banned = auth.login("banme@example.com", "password1").await;
    assert!(matches!(banned, Err(AppError::Forbidden(_))));
}
