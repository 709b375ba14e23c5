use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{PlanType, PremiumPaymentProof};
use crate::repositories::PremiumRepository;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Everything a client needs to complete an off-platform UPI payment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub transaction_id: String,
    pub amount: Decimal,
    pub upi_id: String,
    pub qr_data: String,
    pub plan_name: String,
    pub plan_type: PlanType,
    pub duration_days: i64,
}

/// Service quoting premium plans and accepting payment proofs
pub struct PremiumService {
    premium_repo: Arc<PremiumRepository>,
    config: Arc<AppConfig>,
}

impl PremiumService {
    pub fn new(premium_repo: Arc<PremiumRepository>, config: Arc<AppConfig>) -> Self {
        Self {
            premium_repo,
            config,
        }
    }

    /// Quote a plan: generate a transaction reference and the UPI payment
    /// payload the client renders as a QR code. Nothing is persisted until
    /// the proof is submitted.
    pub fn initiate_payment(&self, user_id: Uuid, plan: PlanType) -> PaymentDetails {
        let transaction_id = format!(
            "SPX-{}",
            Uuid::new_v4().simple().to_string()[..12].to_uppercase()
        );
        let amount = plan.price_inx();

        let qr_data = format!(
            "upi://pay?pa={}&pn={}&am={}&cu=INR&tn={}",
            self.config.upi_merchant_id,
            self.config.upi_merchant_name.replace(' ', "%20"),
            amount,
            transaction_id
        );

        info!(
            "Premium payment initiated: user={}, plan={}, txn={}",
            user_id,
            plan.as_str(),
            transaction_id
        );

        PaymentDetails {
            transaction_id,
            amount,
            upi_id: self.config.upi_merchant_id.clone(),
            qr_data,
            plan_name: plan.display_name().to_string(),
            plan_type: plan,
            duration_days: plan.duration_days(),
        }
    }

    /// Record a submitted payment proof as pending review
    pub async fn submit_proof(
        &self,
        user_id: Uuid,
        transaction_id: &str,
        proof_image: &str,
        plan: PlanType,
    ) -> AppResult<PremiumPaymentProof> {
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(AppError::Validation(
                "Transaction reference is required".to_string(),
            ));
        }
        if proof_image.is_empty() {
            return Err(AppError::Validation(
                "Payment proof is required".to_string(),
            ));
        }

        if self
            .premium_repo
            .find_active_by_transaction_id(transaction_id)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Transaction reference already submitted".to_string(),
            ));
        }

        let proof = self
            .premium_repo
            .create(user_id, transaction_id, plan, proof_image)
            .await
            .map_err(AppError::from)?;

        info!(
            "Premium proof submitted: user={}, plan={}, txn={}",
            user_id,
            plan.as_str(),
            transaction_id
        );

        Ok(proof)
    }

    /// The caller's own payment proofs
    pub async fn user_proofs(&self, user_id: Uuid) -> AppResult<Vec<PremiumPaymentProof>> {
        self.premium_repo
            .list_for_user(user_id)
            .await
            .map_err(AppError::from)
    }
}
