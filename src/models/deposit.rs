use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review status shared by deposits and premium payment proofs.
///
/// A record is created `pending` and is decided exactly once: either
/// `approved` (wallet/premium credited) or `rejected`. Terminal states
/// permit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Whether the record can still be decided
    pub fn is_pending(&self) -> bool {
        matches!(self, ReviewStatus::Pending)
    }
}

impl From<String> for ReviewStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(ReviewStatus::Pending)
    }
}

impl From<ReviewStatus> for String {
    fn from(status: ReviewStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A user-submitted claim of an INR payment awaiting manual admin review
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal, // INR, DECIMAL(20, 2) in database
    pub txn_id: String,
    pub screenshot: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Deposit {
    pub fn review_status(&self) -> ReviewStatus {
        ReviewStatus::from(self.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_status_conversion() {
        assert_eq!(ReviewStatus::Pending.as_str(), "pending");
        assert_eq!(ReviewStatus::Approved.as_str(), "approved");
        assert_eq!(ReviewStatus::Rejected.as_str(), "rejected");

        assert_eq!(
            ReviewStatus::from_str("PENDING").unwrap(),
            ReviewStatus::Pending
        );
        assert!(ReviewStatus::from_str("submitted").is_err());
    }

    #[test]
    fn test_only_pending_is_decidable() {
        assert!(ReviewStatus::Pending.is_pending());
        assert!(!ReviewStatus::Approved.is_pending());
        assert!(!ReviewStatus::Rejected.is_pending());
    }
}
