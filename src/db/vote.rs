use crate::db::StoreError;
use crate::models;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::Instrument;
use uuid::Uuid;

// Flips the viewer's vote on a product and keeps the denormalized
// products.shit_count in step with the ledger. Both writes happen in
// one transaction; the counter is never recomputed from the ledger.
//
// Returns true when the call created a vote, false when it removed one.
//
// Races resolve at the store: a concurrent duplicate insert trips the
// (user_id, product_id) unique constraint and surfaces as Duplicate
// with the counter untouched; a concurrent double-remove sees zero rows
// deleted and skips the decrement.
pub async fn toggle(pool: &PgPool, user_id: &str, product_id: Uuid) -> Result<bool, StoreError> {
    let query_span = tracing::info_span!("Toggling vote");
    async move {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM votes WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let voted = match existing {
            Some(vote_id) => {
                let deleted = sqlx::query("DELETE FROM votes WHERE id = $1")
                    .bind(vote_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();

                if deleted > 0 {
                    sqlx::query(
                        "UPDATE products SET shit_count = shit_count - 1 \
                         WHERE id = $1 AND shit_count > 0",
                    )
                    .bind(product_id)
                    .execute(&mut *tx)
                    .await?;
                }
                false
            }
            None => {
                sqlx::query(
                    "INSERT INTO votes (id, user_id, product_id) VALUES ($1, $2, $3)",
                )
                .bind(Uuid::new_v4())
                .bind(user_id)
                .bind(product_id)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::from_write)?;

                let updated = sqlx::query(
                    "UPDATE products SET shit_count = shit_count + 1 WHERE id = $1",
                )
                .bind(product_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

                if updated == 0 {
                    tx.rollback().await?;
                    return Err(StoreError::NotFound);
                }
                true
            }
        };

        tx.commit().await?;
        Ok(voted)
    }
    .instrument(query_span)
    .await
    .map_err(|err: StoreError| {
        if matches!(err, StoreError::Database(_)) {
            tracing::error!("Failed to toggle vote: {:?}", err);
        }
        err
    })
}

// The viewer's full vote set; listings intersect it with their product
// ids to mark has_voted.
pub async fn fetch_product_ids(
    pool: &PgPool,
    user_id: &str,
) -> Result<HashSet<Uuid>, StoreError> {
    let query_span = tracing::info_span!("Fetching vote set for user");
    sqlx::query_scalar::<_, Uuid>("SELECT product_id FROM votes WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map(|ids| ids.into_iter().collect())
        .map_err(|err| {
            tracing::error!("Failed to fetch vote set: {:?}", err);
            err.into()
        })
}

// Convenience for viewer-scoped listings: anonymous viewers get an
// empty set without a round-trip.
pub async fn viewer_set(
    pool: &PgPool,
    viewer: Option<&str>,
) -> Result<HashSet<Uuid>, StoreError> {
    match viewer {
        Some(user_id) => fetch_product_ids(pool, user_id).await,
        None => Ok(HashSet::new()),
    }
}

pub async fn exists(pool: &PgPool, user_id: &str, product_id: Uuid) -> Result<bool, StoreError> {
    let query_span = tracing::info_span!("Checking for existing vote");
    sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM votes WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map(|row| row.is_some())
    .map_err(|err| {
        tracing::error!("Failed to check vote existence: {:?}", err);
        err.into()
    })
}

pub async fn count_for_product(pool: &PgPool, product_id: Uuid) -> Result<i64, StoreError> {
    let query_span = tracing::info_span!("Counting votes for product");
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes WHERE product_id = $1")
        .bind(product_id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count votes: {:?}", err);
            err.into()
        })
}

pub async fn fetch_by_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<models::Vote>, StoreError> {
    let query_span = tracing::info_span!("Fetching votes for product");
    sqlx::query_as::<_, models::Vote>(
        "SELECT id, user_id, product_id, created_at FROM votes WHERE product_id = $1",
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch votes: {:?}", err);
        err.into()
    })
}
