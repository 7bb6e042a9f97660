//! Note store queries. Every read, update, or delete carries the owner
//! filter (`id = $n AND user_id = $m`); a non-owner can never see or
//! touch another user's note.

use sqlx::PgPool;

use super::models::Note;

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        "SELECT id, user_id, title, content, created_at FROM notes WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO notes (user_id, title, content) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(title)
        .bind(content)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_owned(pool: &PgPool, id: i64, user_id: i64) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        "SELECT id, user_id, title, content, created_at
         FROM notes WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Returns the number of rows updated: zero for a missing or non-owned id.
pub async fn update_owned(
    pool: &PgPool,
    id: i64,
    user_id: i64,
    title: &str,
    content: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE notes SET title = $1, content = $2 WHERE id = $3 AND user_id = $4")
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Returns the number of rows deleted: zero for a missing or non-owned id.
pub async fn delete_owned(pool: &PgPool, id: i64, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
