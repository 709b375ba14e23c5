use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Prefix carried by every referral code
pub const REFERRAL_CODE_PREFIX: &str = "SPELINX";

/// Referral status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    Pending,
    Completed,
}

impl ReferralStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReferralStatus::Pending),
            "completed" => Ok(ReferralStatus::Completed),
            _ => Err(format!("Invalid referral status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralStatus::Pending => "pending",
            ReferralStatus::Completed => "completed",
        }
    }
}

impl From<String> for ReferralStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(ReferralStatus::Pending)
    }
}

/// A referrer/referee attribution created at signup
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: Uuid,
    pub referrer_id: Uuid,
    pub referee_id: Uuid,
    pub status: String,
    pub reward_given: bool,
    pub created_at: NaiveDateTime,
}

/// Build the deterministic referral code for a user: the prefix followed
/// by the last 6 characters of the user id, uppercased.
pub fn referral_code_for(user_id: Uuid) -> String {
    let id = user_id.hyphenated().to_string();
    let suffix = &id[id.len() - 6..];
    format!("{}{}", REFERRAL_CODE_PREFIX, suffix.to_uppercase())
}

/// Reverse a referral code into the lowercase user-id suffix it encodes.
/// Matching against user ids is case-insensitive.
pub fn parse_referral_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() != REFERRAL_CODE_PREFIX.len() + 6 {
        return None;
    }
    let (prefix, suffix) = code.split_at(REFERRAL_CODE_PREFIX.len());
    if !prefix.eq_ignore_ascii_case(REFERRAL_CODE_PREFIX) {
        return None;
    }
    if !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(suffix.to_lowercase())
}
