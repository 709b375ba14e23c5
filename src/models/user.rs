use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User account. Balance-style currency fields live on the [`Wallet`],
/// premium state is denormalized here.
///
/// [`Wallet`]: crate::models::Wallet
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub is_admin: bool,
    pub is_banned: bool,
    pub is_premium: bool,
    pub premium_expires_at: Option<NaiveDateTime>,
    pub premium_type: Option<String>,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Whether the user currently holds an unexpired premium subscription
    pub fn has_active_premium(&self, now: NaiveDateTime) -> bool {
        self.is_premium && self.premium_expires_at.map(|exp| exp > now).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(is_premium: bool, expires: Option<NaiveDateTime>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "player1".to_string(),
            email: "player1@example.com".to_string(),
            password_hash: String::new(),
            password_salt: String::new(),
            is_admin: false,
            is_banned: false,
            is_premium,
            premium_expires_at: expires,
            premium_type: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_active_premium_requires_future_expiry() {
        let now = chrono::Utc::now().naive_utc();

        let expired = sample_user(true, Some(now - chrono::Duration::days(1)));
        assert!(!expired.has_active_premium(now));

        let active = sample_user(true, Some(now + chrono::Duration::days(10)));
        assert!(active.has_active_premium(now));

        let never = sample_user(false, None);
        assert!(!never.has_active_premium(now));
    }
}
