use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Approved => "approved",
            ProductStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub tagline: String,
    pub description: Option<String>,
    pub url: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub github_url: Option<String>,
    pub agent: Option<String>,
    pub llm: Option<String>,
    pub tags: Option<String>, // JSON-encoded list of strings, see tag_list()
    pub user_id: String,
    pub launch_date: NaiveDate,
    pub shit_count: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn tag_list(&self) -> Vec<String> {
        decode_tags(self.tags.as_deref())
    }
}

// A product row joined with its owner's public identity. Every listing
// query returns this shape so views can render the submitter inline.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithOwner {
    #[sqlx(flatten)]
    pub product: Product,
    pub owner_name: Option<String>,
    pub owner_username: Option<String>,
    pub owner_avatar: Option<String>,
}

// The three columns facet derivation reads; kept narrow so the scan
// over the whole approved board stays cheap.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FacetSource {
    pub agent: Option<String>,
    pub llm: Option<String>,
    pub tags: Option<String>,
}

// Tags are persisted as an opaque JSON text column. Rows written before
// the field was validated may hold arbitrary text, so a decode failure
// degrades to "no tags" instead of surfacing an error into listings.
pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .unwrap_or_default()
}

pub fn encode_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    serde_json::to_string(tags).ok()
}
