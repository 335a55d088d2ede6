//! User lookups. Created on first sight of a LINE id; never deleted (spec §3).

use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::models::User;

pub async fn find_by_line_id(pool: &PgPool, line_user_id: &str) -> ServiceResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, line_user_id, preferred_language, is_guest, created_at
         FROM users WHERE line_user_id = $1",
    )
    .bind(line_user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_or_create(
    pool: &PgPool,
    line_user_id: &str,
    preferred_language: &str,
    is_guest: bool,
) -> ServiceResult<User> {
    if let Some(existing) = find_by_line_id(pool, line_user_id).await? {
        return Ok(existing);
    }
    let row = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (line_user_id, preferred_language, is_guest, created_at)
        VALUES ($1, $2, $3, now())
        ON CONFLICT (line_user_id) DO UPDATE SET line_user_id = EXCLUDED.line_user_id
        RETURNING id, line_user_id, preferred_language, is_guest, created_at
        "#,
    )
    .bind(line_user_id)
    .bind(preferred_language)
    .bind(is_guest)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> ServiceResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, line_user_id, preferred_language, is_guest, created_at
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
