use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::UserRow;

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, gemini_api_key, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// The user's stored key. `None` when the user or the key does not exist.
pub async fn get_api_key(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    Ok(find_user(pool, user_id)
        .await?
        .and_then(|user| user.gemini_api_key)
        .filter(|key| !key.trim().is_empty()))
}

/// Stores the key, creating the user row on first save.
pub async fn save_api_key(pool: &PgPool, user_id: Uuid, api_key: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, gemini_api_key)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE
            SET gemini_api_key = EXCLUDED.gemini_api_key,
                updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(api_key)
    .execute(pool)
    .await?;
    Ok(())
}

/// Removes the stored key. Returns whether a user row was touched.
pub async fn clear_api_key(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET gemini_api_key = NULL, updated_at = NOW() WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
