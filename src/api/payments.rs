use super::{ApiContext, CurrentUser};
use crate::error::{AppError, AppResult};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

/// Accept a deposit claim as multipart form data: `amount`, `txnId` and a
/// `screenshot` file part.
pub async fn submit_deposit(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut amount: Option<Decimal> = None;
    let mut txn_id: Option<String> = None;
    let mut screenshot: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "amount" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid amount field: {}", e)))?;
                amount = Some(
                    text.trim()
                        .parse::<Decimal>()
                        .map_err(|_| AppError::Validation("Invalid deposit amount".to_string()))?,
                );
            }
            "txnId" => {
                txn_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid txnId field: {}", e)))?,
                );
            }
            "screenshot" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "proof.png".to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Invalid screenshot upload: {}", e))
                })?;
                // Storage backends are out of scope; keep an opaque reference
                if !bytes.is_empty() {
                    screenshot = Some(format!("uploads/{}-{}", Uuid::new_v4().simple(), file_name));
                }
            }
            _ => {}
        }
    }

    let amount =
        amount.ok_or_else(|| AppError::Validation("Deposit amount is required".to_string()))?;
    let txn_id = txn_id
        .ok_or_else(|| AppError::Validation("Transaction reference is required".to_string()))?;

    let deposit = ctx
        .payments
        .submit_deposit(user.id, amount, &txn_id, screenshot.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "deposit": deposit })),
    ))
}

pub async fn my_deposits(
    State(ctx): State<ApiContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let deposits = ctx.payments.user_deposits(user.id).await?;

    Ok(Json(json!({ "deposits": deposits })))
}
