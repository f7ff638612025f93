use crate::models;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

// Shared payload for submit and edit. Image fields accept either an
// absolute http(s) URL or a same-origin upload reference issued by the
// blob-store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 80)]
    pub name: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 120)]
    pub tagline: String,
    #[validate(max_length = 2000)]
    pub description: Option<String>,
    #[validate(pattern = r"^https?://.+")]
    pub url: String,
    #[validate(pattern = r"^(?:/api/image/.+|https?://.+)$")]
    pub logo_url: Option<String>,
    #[validate(pattern = r"^(?:/api/image/.+|https?://.+)$")]
    pub banner_url: Option<String>,
    #[validate(pattern = r"^https?://.+")]
    pub github_url: Option<String>,
    #[validate(max_length = 100)]
    pub agent: Option<String>,
    #[validate(max_length = 100)]
    pub llm: Option<String>,
    // comma-separated on input, stored JSON-encoded
    #[validate(max_length = 500)]
    pub tags: Option<String>,
}

impl ProductForm {
    // Forms arrive with empty strings for untouched optional inputs;
    // normalize those to None before validating.
    pub fn normalized(mut self) -> Self {
        let clear = |field: &mut Option<String>| {
            if field.as_deref().map_or(false, |v| v.trim().is_empty()) {
                *field = None;
            }
        };
        clear(&mut self.description);
        clear(&mut self.logo_url);
        clear(&mut self.banner_url);
        clear(&mut self.github_url);
        clear(&mut self.agent);
        clear(&mut self.llm);
        clear(&mut self.tags);
        self
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn into_product(
        self,
        user_id: &str,
        slug: String,
        launch_date: NaiveDate,
    ) -> models::Product {
        let tags = models::encode_tags(&self.tag_list());
        models::Product {
            id: Uuid::new_v4(),
            name: self.name,
            slug,
            tagline: self.tagline,
            description: self.description,
            url: self.url,
            logo_url: self.logo_url,
            banner_url: self.banner_url,
            github_url: self.github_url,
            agent: self.agent,
            llm: self.llm,
            tags,
            user_id: user_id.to_string(),
            launch_date,
            shit_count: 0,
            status: models::ProductStatus::Approved.as_str().to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    // Slug, launch date, counter and status survive edits untouched.
    pub fn apply(self, product: &mut models::Product) {
        let tags = models::encode_tags(&self.tag_list());
        product.name = self.name;
        product.tagline = self.tagline;
        product.description = self.description;
        product.url = self.url;
        product.logo_url = self.logo_url;
        product.banner_url = self.banner_url;
        product.github_url = self.github_url;
        product.agent = self.agent;
        product.llm = self.llm;
        product.tags = tags;
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusForm {
    pub status: models::ProductStatus,
}
