use spelinx_backend::auth;
use spelinx_backend::models::referral::{parse_referral_code, referral_code_for};
use spelinx_backend::models::wallet::level_for_xp;
use spelinx_backend::models::{PlanType, ReviewStatus, TransactionType};
use uuid::Uuid;

/// Unit tests for the review state vocabulary
#[test]
fn test_review_status_strings() {
    assert_eq!(ReviewStatus::Pending.as_str(), "pending");
    assert_eq!(ReviewStatus::Approved.as_str(), "approved");
    assert_eq!(ReviewStatus::Rejected.as_str(), "rejected");

    assert!(ReviewStatus::Pending.is_pending());
    assert!(!ReviewStatus::Approved.is_pending());
}

#[test]
fn test_review_status_parses_case_insensitively() {
    assert_eq!(
        ReviewStatus::from_str("Approved").unwrap(),
        ReviewStatus::Approved
    );
    assert!(ReviewStatus::from_str("submitted").is_err());
}

/// Unit tests for plan pricing
#[test]
fn test_plan_table() {
    assert_eq!(PlanType::Monthly.duration_days(), 30);
    assert_eq!(PlanType::Yearly.duration_days(), 365);
    assert_eq!(PlanType::Lifetime.duration_days(), 3650);

    // The same table backs initiation quotes and approval grants
    for plan in [PlanType::Monthly, PlanType::Yearly, PlanType::Lifetime] {
        assert!(plan.price_inx() > rust_decimal::Decimal::ZERO);
        assert_eq!(PlanType::from_str(plan.as_str()).unwrap(), plan);
    }
}

/// Unit tests for referral codes
#[test]
fn test_referral_code_shape() {
    let id = Uuid::new_v4();
    let code = referral_code_for(id);

    assert!(code.starts_with("SPELINX"));
    assert_eq!(code.len(), "SPELINX".len() + 6);
    assert_eq!(code, code.to_uppercase());
}

#[test]
fn test_referral_code_resolution_is_case_insensitive() {
    let id = Uuid::new_v4();
    let code = referral_code_for(id);

    let suffix = parse_referral_code(&code.to_lowercase()).unwrap();
    assert!(id.hyphenated().to_string().ends_with(&suffix));
}

#[test]
fn test_referral_code_rejects_garbage() {
    assert!(parse_referral_code("").is_none());
    assert!(parse_referral_code("SPELINX").is_none());
    assert!(parse_referral_code("NOTSPELINXAB12").is_none());
}

/// Unit tests for transaction types
#[test]
fn test_transaction_type_strings() {
    assert_eq!(TransactionType::Deposit.as_str(), "deposit");
    assert_eq!(
        TransactionType::PremiumPurchase.as_str(),
        "premium_purchase"
    );
    assert!(TransactionType::from_str("unknown").is_err());
}

/// Unit tests for level derivation
#[test]
fn test_level_derivation() {
    assert_eq!(level_for_xp(0), 1);
    assert_eq!(level_for_xp(2500), 3);
}

/// Unit tests for tokens and password digests
#[test]
fn test_token_roundtrip() {
    let user_id = Uuid::new_v4();
    let token = auth::create_token(user_id, "integration-test-secret", 600).unwrap();

    let claims = auth::validate_token(&token, "integration-test-secret").unwrap();
    assert_eq!(auth::user_id_from_claims(&claims).unwrap(), user_id);
}

#[test]
fn test_password_digest_depends_on_salt() {
    let a = auth::hash_password("secret", "salt-a");
    let b = auth::hash_password("secret", "salt-b");
    assert_ne!(a, b);
    assert!(auth::verify_password("secret", "salt-a", &a));
}

/// Unit tests for error mapping
#[test]
fn test_error_status_codes() {
    use axum::http::StatusCode;
    use spelinx_backend::error::AppError;

    assert_eq!(
        AppError::Conflict("dup".into()).status_code(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::Validation("bad".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Unauthorized("no".into()).status_code(),
        StatusCode::UNAUTHORIZED
    );
}
