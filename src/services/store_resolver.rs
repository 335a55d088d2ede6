//! Store Resolver (C1, spec §4.1). The only component allowed to create
//! `stores` rows (spec §9 "Store-key polymorphism").

use sqlx::PgPool;

use crate::db::stores;
use crate::error::{AppError, AppResult, ServiceResult};
use crate::models::store::DEFAULT_STORE_NAME;

const PLACE_ID_MIN_LEN: usize = 10;

/// Pure, no DB access (spec §4.1 `validate_format`).
pub fn validate_format(raw: &str) -> (bool, &'static str) {
    if raw.parse::<i64>().map(|n| n > 0).unwrap_or(false) {
        return (true, "integer");
    }
    if raw.chars().all(|c| c.is_ascii_digit()) && !raw.is_empty() {
        return (true, "numeric string");
    }
    if (raw.starts_with("ChIJ") || raw.starts_with("ChlJ")) && raw.len() >= PLACE_ID_MIN_LEN {
        return (true, "place id");
    }
    (false, "unrecognised store key shape")
}

/// `resolve(raw) -> int` (spec §4.1). Fails with `InvalidStoreId` on a
/// malformed key; creates a Store on first sight of an unseen Place ID.
pub async fn resolve(pool: &PgPool, raw: &str) -> ServiceResult<i64> {
    let (ok, _) = validate_format(raw);
    if !ok {
        return Err(AppError::invalid_store_id(raw).into());
    }

    if let Ok(n) = raw.parse::<i64>() {
        if n > 0 {
            return Ok(n);
        }
    }

    resolve_place_id(pool, raw).await
}

/// `safe_resolve(raw, fallback_id)` — same, but never fails.
pub async fn safe_resolve(pool: &PgPool, raw: &str, fallback_id: i64) -> i64 {
    resolve(pool, raw).await.unwrap_or(fallback_id)
}

async fn resolve_place_id(pool: &PgPool, place_id: &str) -> ServiceResult<i64> {
    if let Some(store) = stores::find_by_place_id(pool, place_id).await? {
        return Ok(store.id);
    }

    match stores::create_from_place_id(pool, place_id, DEFAULT_STORE_NAME).await {
        Ok(store) => Ok(store.id),
        Err(_) => {
            // Unique-violation race (spec §4.1, R4): re-read and return the winner's id.
            stores::find_by_place_id(pool, place_id)
                .await?
                .map(|s| s.id)
                .ok_or_else(|| AppError::database("place id not found after insert race").into())
        }
    }
}

/// `strict_validate(raw, allow_create)` (spec §4.1): hits DB; when
/// `allow_create = false` an unseen Place ID is rejected rather than created.
pub async fn strict_validate(pool: &PgPool, raw: &str, allow_create: bool) -> AppResult<bool> {
    let (ok, _) = validate_format(raw);
    if !ok {
        return Ok(false);
    }
    if raw.parse::<i64>().map(|n| n > 0).unwrap_or(false) {
        return Ok(stores::find_by_id(pool, raw.parse().unwrap())
            .await
            .map_err(AppError::from)?
            .is_some());
    }
    let existing = stores::find_by_place_id(pool, raw).await.map_err(AppError::from)?;
    Ok(existing.is_some() || allow_create)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integer_string() {
        assert_eq!(validate_format("42"), (true, "integer"));
    }

    #[test]
    fn accepts_chij_prefixed_place_id() {
        assert_eq!(validate_format("ChIJAAAAAAAAAAAAAAAAAAAAAAA").0, true);
    }

    #[test]
    fn accepts_chlj_quirk_prefix() {
        // spec §9 Open Question 1: the lower-case-L quirk is preserved verbatim.
        assert_eq!(validate_format("ChlJAAAAAAAAAAAAAAAAAAAAAAA").0, true);
    }

    #[test]
    fn rejects_short_place_id_looking_string() {
        assert_eq!(validate_format("ChIJshort").0, false);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(validate_format("not-a-store-key!!").0, false);
    }
}
