use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kinds of wallet mutations recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    PremiumPurchase,
    ReferralReward,
    ReferralBonus,
    DailyClaim,
}

impl TransactionType {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "deposit" => Ok(TransactionType::Deposit),
            "premium_purchase" => Ok(TransactionType::PremiumPurchase),
            "referral_reward" => Ok(TransactionType::ReferralReward),
            "referral_bonus" => Ok(TransactionType::ReferralBonus),
            "daily_claim" => Ok(TransactionType::DailyClaim),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::PremiumPurchase => "premium_purchase",
            TransactionType::ReferralReward => "referral_reward",
            TransactionType::ReferralBonus => "referral_bonus",
            TransactionType::DailyClaim => "daily_claim",
        }
    }
}

/// Immutable audit record appended alongside every wallet mutation.
///
/// The wallet row holds the current balance; this log records how it got
/// there, with the balance before and after each step.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tx_type: String,
    pub amount: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_roundtrip() {
        for t in [
            TransactionType::Deposit,
            TransactionType::PremiumPurchase,
            TransactionType::ReferralReward,
            TransactionType::ReferralBonus,
            TransactionType::DailyClaim,
        ] {
            assert_eq!(TransactionType::from_str(t.as_str()).unwrap(), t);
        }
        assert!(TransactionType::from_str("spin").is_err());
    }
}
