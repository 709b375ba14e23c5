use crate::error::{AppError, AppResult};
use crate::models::{Deposit, PremiumPaymentProof, User};
use crate::repositories::{
    DepositAdminRow, DepositRepository, PremiumProofAdminRow, PremiumRepository,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Minimum length of a rejection reason
pub const MIN_REJECTION_NOTES: usize = 5;

const DEFAULT_PAGE_LIMIT: i64 = 20;
const MAX_PAGE_LIMIT: i64 = 100;

/// Pagination metadata returned alongside admin listings
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

fn clamp_paging(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    (page, limit)
}

fn validate_rejection_notes(notes: &str) -> AppResult<()> {
    if notes.trim().len() < MIN_REJECTION_NOTES {
        return Err(AppError::Validation(format!(
            "Rejection reason must be at least {} characters",
            MIN_REJECTION_NOTES
        )));
    }
    Ok(())
}

/// Admin-only review over pending deposits and premium payment proofs.
///
/// Every record is decided exactly once; the terminal-state guard and the
/// wallet/premium side effects run inside a single database transaction
/// in the repositories.
pub struct ReviewService {
    deposit_repo: Arc<DepositRepository>,
    premium_repo: Arc<PremiumRepository>,
}

impl ReviewService {
    pub fn new(deposit_repo: Arc<DepositRepository>, premium_repo: Arc<PremiumRepository>) -> Self {
        Self {
            deposit_repo,
            premium_repo,
        }
    }

    /// Paginated deposit listing for the admin panel
    pub async fn list_deposits(
        &self,
        status: Option<&str>,
        search: Option<&str>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<(Vec<DepositAdminRow>, Pagination)> {
        let (page, limit) = clamp_paging(page, limit);
        let (rows, total) = self
            .deposit_repo
            .list_paginated(status, search, page, limit)
            .await
            .map_err(AppError::from)?;

        Ok((rows, Pagination::new(page, limit, total)))
    }

    /// Approve a pending deposit: flips status and credits the wallet
    pub async fn approve_deposit(
        &self,
        id: Uuid,
        admin: &User,
        notes: Option<&str>,
    ) -> AppResult<Deposit> {
        let deposit = self
            .deposit_repo
            .approve(id, admin.id, notes)
            .await
            .map_err(AppError::from)?;

        info!(
            "Deposit approved: id={}, amount={}, reviewer={}",
            deposit.id, deposit.amount, admin.username
        );

        Ok(deposit)
    }

    /// Reject a pending deposit; requires a reason of at least 5 characters
    pub async fn reject_deposit(&self, id: Uuid, admin: &User, notes: &str) -> AppResult<Deposit> {
        validate_rejection_notes(notes)?;

        let deposit = self
            .deposit_repo
            .reject(id, admin.id, notes)
            .await
            .map_err(AppError::from)?;

        info!(
            "Deposit rejected: id={}, reviewer={}",
            deposit.id, admin.username
        );

        Ok(deposit)
    }

    /// Paginated premium-proof listing for the admin panel
    pub async fn list_premium_payments(
        &self,
        status: Option<&str>,
        search: Option<&str>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<(Vec<PremiumProofAdminRow>, Pagination)> {
        let (page, limit) = clamp_paging(page, limit);
        let (rows, total) = self
            .premium_repo
            .list_paginated(status, search, page, limit)
            .await
            .map_err(AppError::from)?;

        Ok((rows, Pagination::new(page, limit, total)))
    }

    /// Approve a pending premium proof: flips status and extends the
    /// user's subscription (stacking on any unexpired remainder)
    pub async fn approve_premium_payment(
        &self,
        id: Uuid,
        admin: &User,
        notes: Option<&str>,
    ) -> AppResult<(PremiumPaymentProof, User)> {
        let (proof, user) = self
            .premium_repo
            .approve(id, admin.id, notes)
            .await
            .map_err(AppError::from)?;

        info!(
            "Premium payment approved: id={}, plan={}, user={}, reviewer={}",
            proof.id, proof.plan_type, user.username, admin.username
        );

        Ok((proof, user))
    }

    /// Reject a pending premium proof; requires a reason of at least
    /// 5 characters
    pub async fn reject_premium_payment(
        &self,
        id: Uuid,
        admin: &User,
        notes: &str,
    ) -> AppResult<PremiumPaymentProof> {
        validate_rejection_notes(notes)?;

        let proof = self
            .premium_repo
            .reject(id, admin.id, notes)
            .await
            .map_err(AppError::from)?;

        info!(
            "Premium payment rejected: id={}, reviewer={}",
            proof.id, admin.username
        );

        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(1, 20, 45);
        assert_eq!(p.pages, 3);

        let p = Pagination::new(1, 20, 40);
        assert_eq!(p.pages, 2);

        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.pages, 0);

        // Never report zero pages when records exist
        let p = Pagination::new(1, 20, 1);
        assert_eq!(p.pages, 1);
    }

    #[test]
    fn test_clamp_paging() {
        assert_eq!(clamp_paging(None, None), (1, 20));
        assert_eq!(clamp_paging(Some(0), Some(500)), (1, 100));
        assert_eq!(clamp_paging(Some(3), Some(10)), (3, 10));
    }

    #[test]
    fn test_rejection_notes_length() {
        assert!(validate_rejection_notes("").is_err());
        assert!(validate_rejection_notes("bad").is_err());
        assert!(validate_rejection_notes("  ab  ").is_err());
        assert!(validate_rejection_notes("blurry screenshot").is_ok());
    }
}
