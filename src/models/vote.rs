use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// One row per (user, product) pair; the pair is unique at the store level.
// products.shit_count is kept in sync with the row count by db::vote::toggle.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}
