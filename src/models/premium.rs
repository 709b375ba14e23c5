use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Premium subscription plan tiers.
///
/// One pricing table is shared by payment initiation and admin approval,
/// so the amount quoted to the user and the duration granted on approval
/// can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Monthly,
    Yearly,
    Lifetime,
}

impl PlanType {
    /// Convert from database/API string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(PlanType::Monthly),
            "yearly" => Ok(PlanType::Yearly),
            "lifetime" => Ok(PlanType::Lifetime),
            _ => Err(format!("Invalid plan type: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "monthly",
            PlanType::Yearly => "yearly",
            PlanType::Lifetime => "lifetime",
        }
    }

    /// Human-readable plan name
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanType::Monthly => "Premium Monthly",
            PlanType::Yearly => "Premium Yearly",
            PlanType::Lifetime => "Premium Lifetime",
        }
    }

    /// Subscription duration granted on approval
    pub fn duration_days(&self) -> i64 {
        match self {
            PlanType::Monthly => 30,
            PlanType::Yearly => 365,
            PlanType::Lifetime => 3650,
        }
    }

    /// Plan price in INX
    pub fn price_inx(&self) -> Decimal {
        match self {
            PlanType::Monthly => Decimal::new(99, 0),
            PlanType::Yearly => Decimal::new(999, 0),
            PlanType::Lifetime => Decimal::new(2499, 0),
        }
    }
}

/// A submitted proof of an off-platform premium payment, analogous in
/// lifecycle to [`Deposit`].
///
/// [`Deposit`]: crate::models::Deposit
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PremiumPaymentProof {
    pub id: Uuid,
    pub user_id: Uuid,
    pub transaction_id: String,
    pub plan_type: String,
    pub amount: Decimal, // INX, DECIMAL(20, 2) in database
    pub proof_image: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl PremiumPaymentProof {
    pub fn review_status(&self) -> super::ReviewStatus {
        super::ReviewStatus::from(self.status.clone())
    }

    pub fn plan(&self) -> Result<PlanType, String> {
        PlanType::from_str(&self.plan_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_type_conversion() {
        assert_eq!(PlanType::from_str("monthly").unwrap(), PlanType::Monthly);
        assert_eq!(PlanType::from_str("LIFETIME").unwrap(), PlanType::Lifetime);
        assert!(PlanType::from_str("weekly").is_err());
    }

    #[test]
    fn test_plan_durations() {
        assert_eq!(PlanType::Monthly.duration_days(), 30);
        assert_eq!(PlanType::Yearly.duration_days(), 365);
        assert_eq!(PlanType::Lifetime.duration_days(), 3650);
    }

    #[test]
    fn test_plan_prices_increase_with_tier() {
        assert!(PlanType::Monthly.price_inx() < PlanType::Yearly.price_inx());
        assert!(PlanType::Yearly.price_inx() < PlanType::Lifetime.price_inx());
    }
}
