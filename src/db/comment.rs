use crate::db::StoreError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn insert(
    pool: &PgPool,
    user_id: &str,
    product_id: Uuid,
    content: &str,
) -> Result<models::Comment, StoreError> {
    let query_span = tracing::info_span!("Saving new comment into the database");
    sqlx::query_as::<_, models::Comment>(
        r#"
        INSERT INTO comments (id, user_id, product_id, content)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, product_id, content, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .bind(content)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        let err = StoreError::from_write(err);
        if !matches!(err, StoreError::NotFound) {
            tracing::error!("Failed to insert comment: {:?}", err);
        }
        err
    })
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Comment>, StoreError> {
    let query_span = tracing::info_span!("Fetching comment by id");
    sqlx::query_as::<_, models::Comment>(
        "SELECT id, user_id, product_id, content, created_at FROM comments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch comment: {:?}", err);
        err.into()
    })
}

// Thread order is chronological, oldest first.
pub async fn fetch_by_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<models::CommentWithAuthor>, StoreError> {
    let query_span = tracing::info_span!("Fetching comments for product");
    sqlx::query_as::<_, models::CommentWithAuthor>(
        r#"
        SELECT c.id, c.user_id, c.product_id, c.content, c.created_at,
               u.name AS author_name, u.username AS author_username,
               u.avatar_url AS author_avatar
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.product_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch comments: {:?}", err);
        err.into()
    })
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let query_span = tracing::info_span!("Deleting comment");
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete comment: {:?}", err);
            StoreError::from(err)
        })?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
