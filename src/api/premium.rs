use super::{ApiContext, CurrentUser};
use crate::error::{AppError, AppResult};
use crate::models::PlanType;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct InitiatePaymentRequest {
    #[serde(rename = "type")]
    pub plan_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProofRequest {
    pub transaction_id: String,
    pub proof_image: String,
    pub plan_type: String,
}

pub async fn initiate_payment(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<InitiatePaymentRequest>,
) -> AppResult<impl IntoResponse> {
    let plan = PlanType::from_str(&req.plan_type).map_err(AppError::Validation)?;

    let details = ctx.premium.initiate_payment(user.id, plan);

    Ok(Json(json!({ "success": true, "paymentDetails": details })))
}

pub async fn submit_proof(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SubmitProofRequest>,
) -> AppResult<impl IntoResponse> {
    let plan = PlanType::from_str(&req.plan_type).map_err(AppError::Validation)?;

    let proof = ctx
        .premium
        .submit_proof(user.id, &req.transaction_id, &req.proof_image, plan)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "proofId": proof.id,
            "transactionId": proof.transaction_id,
            "status": proof.status,
        })),
    ))
}

pub async fn my_proofs(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let proofs = ctx.premium.user_proofs(user.id).await?;

    Ok(Json(json!({ "proofs": proofs })))
}
