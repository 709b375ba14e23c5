use super::{AdminUser, ApiContext};
use crate::error::AppResult;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub notes: Option<String>,
}

// `notes` stays optional at the extractor so an absent field reaches
// the rejection-notes validation instead of the generic 422.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub notes: Option<String>,
}

pub async fn list_deposits(
    State(ctx): State<ApiContext>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let (deposits, pagination) = ctx
        .review
        .list_deposits(query.status(), query.search(), query.page, query.limit)
        .await?;

    Ok(Json(json!({ "deposits": deposits, "pagination": pagination })))
}

pub async fn approve_deposit(
    State(ctx): State<ApiContext>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let deposit = ctx
        .review
        .approve_deposit(id, &admin, req.notes.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Deposit approved, wallet credited",
        "deposit": deposit,
    })))
}

pub async fn reject_deposit(
    State(ctx): State<ApiContext>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let deposit = ctx
        .review
        .reject_deposit(id, &admin, req.notes.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Deposit rejected",
        "deposit": deposit,
    })))
}

pub async fn list_premium_payments(
    State(ctx): State<ApiContext>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let (payments, pagination) = ctx
        .review
        .list_premium_payments(query.status(), query.search(), query.page, query.limit)
        .await?;

    Ok(Json(json!({ "payments": payments, "pagination": pagination })))
}

pub async fn approve_premium_payment(
    State(ctx): State<ApiContext>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let (proof, user) = ctx
        .review
        .approve_premium_payment(id, &admin, req.notes.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Premium payment approved, subscription activated",
        "payment": proof,
        "user": user,
    })))
}

pub async fn reject_premium_payment(
    State(ctx): State<ApiContext>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let proof = ctx
        .review
        .reject_premium_payment(id, &admin, req.notes.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Premium payment rejected",
        "payment": proof,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_body_without_notes_deserializes() {
        // An empty body must reach the notes validation, not be bounced
        // by serde as a 422
        let req: RejectRequest = serde_json::from_str("{}").unwrap();
        assert!(req.notes.is_none());

        let req: RejectRequest = serde_json::from_str(r#"{"notes": "blurry"}"#).unwrap();
        assert_eq!(req.notes.as_deref(), Some("blurry"));
    }
}

pub async fn reward_referral(
    State(ctx): State<ApiContext>,
    AdminUser(_admin): AdminUser,
    Path(referee_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let referral = ctx.referrals.reward(referee_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Referral reward granted",
        "referral": referral,
    })))
}
