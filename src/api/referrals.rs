use super::{ApiContext, CurrentUser};
use crate::error::AppResult;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCodeRequest {
    pub referral_code: String,
    pub new_user_id: Uuid,
}

pub async fn code(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    Ok(Json(json!({ "referralCode": ctx.referrals.code_for(user.id) })))
}

pub async fn use_code(
    State(ctx): State<ApiContext>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<UseCodeRequest>,
) -> AppResult<impl IntoResponse> {
    ctx.referrals
        .use_code(&req.referral_code, req.new_user_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Referral applied, rewards credited",
    })))
}

pub async fn stats(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let referrals = ctx.referrals.stats(user.id).await?;

    Ok(Json(json!({
        "total": referrals.len(),
        "referrals": referrals,
    })))
}
