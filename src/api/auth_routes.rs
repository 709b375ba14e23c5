use super::{ApiContext, CurrentUser};
use crate::error::AppResult;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub referral_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn signup(
    State(ctx): State<ApiContext>,
    Json(req): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let (user, token) = ctx
        .auth
        .signup(
            &req.username,
            &req.email,
            &req.password,
            req.referral_code.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "token": token, "user": user })),
    ))
}

pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (user, token) = ctx.auth.login(&req.email, &req.password).await?;

    Ok(Json(json!({ "success": true, "token": token, "user": user })))
}

pub async fn me(CurrentUser(user): CurrentUser) -> AppResult<impl IntoResponse> {
    Ok(Json(json!({ "user": user })))
}
