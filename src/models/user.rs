//! User — surrogate id plus the external LINE identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub line_user_id: String,
    pub preferred_language: String,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
}

/// `^U[0-9a-f]{32}$` — the only shape LINE push will accept (spec §4.7, P7).
pub fn is_valid_line_user_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 33
        && bytes[0] == b'U'
        && bytes[1..].iter().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
}

/// Temporary guest identifier for submissions with no LINE id (spec §4.2 step 2).
pub fn guest_identifier(unix_ms: i64) -> String {
    format!("temp_guest_{unix_ms}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_id() {
        assert!(is_valid_line_user_id(
            "Udeadbeef0123456789abcdef01234567"
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_line_user_id("U1234567890abcdef"));
    }

    #[test]
    fn rejects_uppercase_hex() {
        assert!(!is_valid_line_user_id(
            "UDEADBEEF0123456789ABCDEF01234567"
        ));
    }

    #[test]
    fn rejects_guest_token() {
        assert!(!is_valid_line_user_id("temp_guest_1234567890"));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(!is_valid_line_user_id(
            "deadbeef0123456789abcdef012345678"
        ));
    }

    #[test]
    fn guest_identifier_format() {
        assert_eq!(guest_identifier(1_700_000_000_000), "temp_guest_1700000000000");
    }
}
