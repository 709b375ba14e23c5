use super::{ApiContext, CurrentUser};
use crate::error::AppResult;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub async fn get_wallet(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let wallet = ctx.wallet.get_wallet(user.id).await?;

    Ok(Json(json!({ "wallet": wallet })))
}

pub async fn transactions(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<impl IntoResponse> {
    let transactions = ctx.wallet.transactions(user.id, query.limit).await?;

    Ok(Json(json!({ "transactions": transactions })))
}

pub async fn daily_claim(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let wallet = ctx.wallet.daily_claim(user.id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Daily reward claimed",
        "wallet": wallet,
    })))
}
