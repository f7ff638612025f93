use crate::db::StoreError;
use crate::models;
use crate::models::ProductStatus;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

// Trending and search listings are capped; the boards render a single
// page and there is no pagination.
pub const RESULT_CAP: i64 = 50;

const WITH_OWNER: &str = r#"
    SELECT p.id, p.name, p.slug, p.tagline, p.description, p.url,
           p.logo_url, p.banner_url, p.github_url, p.agent, p.llm, p.tags,
           p.user_id, p.launch_date, p.shit_count, p.status, p.created_at,
           u.name AS owner_name, u.username AS owner_username, u.avatar_url AS owner_avatar
    FROM products p
    JOIN users u ON u.id = p.user_id
"#;

fn with_owner(tail: &str) -> String {
    format!("{} {}", WITH_OWNER, tail)
}

pub async fn insert(
    pool: &PgPool,
    product: models::Product,
) -> Result<models::Product, StoreError> {
    let query_span = tracing::info_span!("Saving new product into the database");
    sqlx::query_as::<_, models::Product>(
        r#"
        INSERT INTO products (id, name, slug, tagline, description, url, logo_url,
                              banner_url, github_url, agent, llm, tags, user_id,
                              launch_date, shit_count, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                NOW() at time zone 'utc')
        RETURNING id, name, slug, tagline, description, url, logo_url, banner_url,
                  github_url, agent, llm, tags, user_id, launch_date, shit_count,
                  status, created_at
        "#,
    )
    .bind(product.id)
    .bind(product.name)
    .bind(product.slug)
    .bind(product.tagline)
    .bind(product.description)
    .bind(product.url)
    .bind(product.logo_url)
    .bind(product.banner_url)
    .bind(product.github_url)
    .bind(product.agent)
    .bind(product.llm)
    .bind(product.tags)
    .bind(product.user_id)
    .bind(product.launch_date)
    .bind(product.shit_count)
    .bind(product.status)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        let err = StoreError::from_write(err);
        if !matches!(err, StoreError::Duplicate) {
            tracing::error!("Failed to insert product: {:?}", err);
        }
        err
    })
}

pub async fn fetch_by_id(pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, StoreError> {
    let query_span = tracing::info_span!("Fetching product by id");
    sqlx::query_as::<_, models::Product>(
        r#"
        SELECT id, name, slug, tagline, description, url, logo_url, banner_url,
               github_url, agent, llm, tags, user_id, launch_date, shit_count,
               status, created_at
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch product {}: {:?}", id, err);
        err.into()
    })
}

// No status gate here: owners and admins reach non-approved products
// through their direct link, unlike every listing query.
pub async fn fetch_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching product by slug");
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner("WHERE p.slug = $1"))
        .bind(slug)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product by slug: {:?}", err);
            err.into()
        })
}

// Full approved board: newest launch day first, most-voted first within
// a day. Views group the flat rows into per-day buckets.
pub async fn fetch_approved(pool: &PgPool) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching approved products");
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
        "WHERE p.status = $1 ORDER BY p.launch_date DESC, p.shit_count DESC, p.created_at ASC",
    ))
    .bind(ProductStatus::Approved.as_str())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch approved products: {:?}", err);
        err.into()
    })
}

pub async fn fetch_approved_by_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching approved products for launch date");
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
        "WHERE p.status = $1 AND p.launch_date = $2 ORDER BY p.shit_count DESC, p.created_at ASC",
    ))
    .bind(ProductStatus::Approved.as_str())
    .bind(date)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch products by date: {:?}", err);
        err.into()
    })
}

// Submissions of one user, every status, newest first.
pub async fn fetch_by_owner(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching products by owner");
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
        "WHERE p.user_id = $1 ORDER BY p.created_at DESC",
    ))
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch products by owner: {:?}", err);
        err.into()
    })
}

pub async fn fetch_voted_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching products voted by user");
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
        "JOIN votes v ON v.product_id = p.id \
         WHERE v.user_id = $1 ORDER BY p.shit_count DESC, p.created_at ASC",
    ))
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch voted products: {:?}", err);
        err.into()
    })
}

pub async fn search(
    pool: &PgPool,
    query: &str,
) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Searching products");
    let pattern = format!("%{}%", query);
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
        "WHERE p.status = $1 AND (p.name ILIKE $2 OR p.tagline ILIKE $2) \
         ORDER BY p.shit_count DESC, p.created_at ASC LIMIT $3",
    ))
    .bind(ProductStatus::Approved.as_str())
    .bind(pattern)
    .bind(RESULT_CAP)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to search products: {:?}", err);
        err.into()
    })
}

// `since = None` means the all-time board.
pub async fn fetch_trending(
    pool: &PgPool,
    since: Option<NaiveDate>,
) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching trending products");
    let result = match since {
        Some(since) => {
            sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
                "WHERE p.status = $1 AND p.launch_date >= $2 \
                 ORDER BY p.shit_count DESC, p.created_at ASC LIMIT $3",
            ))
            .bind(ProductStatus::Approved.as_str())
            .bind(since)
            .bind(RESULT_CAP)
            .fetch_all(pool)
            .instrument(query_span)
            .await
        }
        None => {
            sqlx::query_as::<_, models::ProductWithOwner>(&with_owner(
                "WHERE p.status = $1 ORDER BY p.shit_count DESC, p.created_at ASC LIMIT $2",
            ))
            .bind(ProductStatus::Approved.as_str())
            .bind(RESULT_CAP)
            .fetch_all(pool)
            .instrument(query_span)
            .await
        }
    };

    result.map_err(|err| {
        tracing::error!("Failed to fetch trending products: {:?}", err);
        err.into()
    })
}

// Moderation queue: every product regardless of status, newest first.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::ProductWithOwner>, StoreError> {
    let query_span = tracing::info_span!("Fetching all products");
    sqlx::query_as::<_, models::ProductWithOwner>(&with_owner("ORDER BY p.created_at DESC"))
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch all products: {:?}", err);
            err.into()
        })
}

// Raw facet source columns of the approved board; facet derivation
// itself is pure code in views::filter.
pub async fn fetch_facet_sources(pool: &PgPool) -> Result<Vec<models::FacetSource>, StoreError> {
    let query_span = tracing::info_span!("Fetching facet sources");
    sqlx::query_as::<_, models::FacetSource>(
        r#"
        SELECT agent, llm, tags
        FROM products
        WHERE status = $1
        "#,
    )
    .bind(ProductStatus::Approved.as_str())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch facet sources: {:?}", err);
        err.into()
    })
}

pub async fn update(
    pool: &PgPool,
    product: models::Product,
) -> Result<models::Product, StoreError> {
    let query_span = tracing::info_span!("Updating product");
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE products
        SET name = $2,
            tagline = $3,
            description = $4,
            url = $5,
            logo_url = $6,
            banner_url = $7,
            github_url = $8,
            agent = $9,
            llm = $10,
            tags = $11
        WHERE id = $1
        RETURNING id, name, slug, tagline, description, url, logo_url, banner_url,
                  github_url, agent, llm, tags, user_id, launch_date, shit_count,
                  status, created_at
        "#,
    )
    .bind(product.id)
    .bind(product.name)
    .bind(product.tagline)
    .bind(product.description)
    .bind(product.url)
    .bind(product.logo_url)
    .bind(product.banner_url)
    .bind(product.github_url)
    .bind(product.agent)
    .bind(product.llm)
    .bind(product.tags)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update product: {:?}", err);
        StoreError::from_write(err)
    })?
    .ok_or(StoreError::NotFound)
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: ProductStatus,
) -> Result<(), StoreError> {
    let query_span = tracing::info_span!("Updating product status");
    let result = sqlx::query("UPDATE products SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to update product status: {:?}", err);
            StoreError::from(err)
        })?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

// Votes and comments go with the product through the FK cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let query_span = tracing::info_span!("Deleting product");
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete product: {:?}", err);
            StoreError::from(err)
        })?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
