use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// XP required per level step
pub const XP_PER_LEVEL: i64 = 1000;

/// Per-user wallet holding the in-game currency (INX), XP and level.
/// Exactly one wallet exists per user; it is created lazily on first access.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub user_id: Uuid,
    pub inx: Decimal,    // DECIMAL(20, 2) in database
    pub xp: i64,
    pub level: i32,
    pub last_check_in: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

/// Derive the level from accumulated XP
pub fn level_for_xp(xp: i64) -> i32 {
    (xp / XP_PER_LEVEL + 1) as i32
}

impl Wallet {
    /// Whether a daily check-in was already claimed on the given date
    pub fn claimed_on(&self, date: NaiveDate) -> bool {
        self.last_check_in == Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1000), 2);
        assert_eq!(level_for_xp(5200), 6);
    }
}
