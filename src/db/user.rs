use crate::db::StoreError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

// Called on every authenticated request: first sign-in creates the row,
// later sign-ins refresh the handle and avatar the provider reports.
// The role column is never touched here; promoting an admin is a manual
// operation on the users table.
pub async fn upsert(
    pool: &PgPool,
    id: &str,
    name: Option<&str>,
    username: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<models::User, StoreError> {
    let query_span = tracing::info_span!("Upserting user from identity provider");
    sqlx::query_as::<_, models::User>(
        r#"
        INSERT INTO users (id, name, username, avatar_url)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name,
            username = EXCLUDED.username,
            avatar_url = EXCLUDED.avatar_url,
            updated_at = NOW() at time zone 'utc'
        RETURNING id, name, username, avatar_url, role, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(username)
    .bind(avatar_url)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to upsert user {}: {:?}", id, err);
        StoreError::from_write(err)
    })
}

pub async fn fetch_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<models::User>, StoreError> {
    let query_span = tracing::info_span!("Fetching user by username");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT id, name, username, avatar_url, role, created_at, updated_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user by username: {:?}", err);
        err.into()
    })
}
