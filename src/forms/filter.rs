use crate::models;
use serde::{Deserialize, Serialize};

// Facet filter over listing results. Supplied fields must all match
// (conjunctive); absent fields impose no constraint. Applied after the
// base query so it never changes how results are ranked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filter {
    pub agent: Option<String>,
    pub llm: Option<String>,
    pub tag: Option<String>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.agent.is_none() && self.llm.is_none() && self.tag.is_none()
    }

    pub fn matches(&self, product: &models::Product) -> bool {
        if let Some(agent) = self.agent.as_deref() {
            if product.agent.as_deref() != Some(agent) {
                return false;
            }
        }
        if let Some(llm) = self.llm.as_deref() {
            if product.llm.as_deref() != Some(llm) {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            // malformed tag data decodes to an empty list and so fails here
            if !product.tag_list().iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }

    pub fn apply(
        &self,
        rows: Vec<models::ProductWithOwner>,
    ) -> Vec<models::ProductWithOwner> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter()
            .filter(|row| self.matches(&row.product))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(agent: Option<&str>, llm: Option<&str>, tags: Option<&str>) -> models::Product {
        models::Product {
            id: Uuid::new_v4(),
            name: "p".into(),
            slug: "p".into(),
            tagline: "t".into(),
            description: None,
            url: "https://example.com".into(),
            logo_url: None,
            banner_url: None,
            github_url: None,
            agent: agent.map(Into::into),
            llm: llm.map(Into::into),
            tags: tags.map(Into::into),
            user_id: "u1".into(),
            launch_date: Utc::now().date_naive(),
            shit_count: 0,
            status: "approved".into(),
            created_at: Utc::now(),
        }
    }

    fn filter(agent: Option<&str>, llm: Option<&str>, tag: Option<&str>) -> Filter {
        Filter {
            agent: agent.map(Into::into),
            llm: llm.map(Into::into),
            tag: tag.map(Into::into),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let p = product(None, None, None);
        assert!(filter(None, None, None).matches(&p));
    }

    #[test]
    fn filters_are_conjunctive() {
        let p = product(Some("Cursor"), None, Some(r#"["ai","saas"]"#));

        assert!(filter(Some("Cursor"), None, Some("ai")).matches(&p));
        assert!(!filter(Some("Cursor"), None, Some("web3")).matches(&p));
        assert!(!filter(Some("Lovable"), None, None).matches(&p));
    }

    #[test]
    fn agent_and_llm_require_exact_equality() {
        let p = product(Some("Cursor"), Some("GPT-4"), None);
        assert!(!filter(Some("cursor"), None, None).matches(&p));
        assert!(filter(None, Some("GPT-4"), None).matches(&p));
        assert!(!filter(None, Some("GPT"), None).matches(&p));
    }

    #[test]
    fn tag_filter_fails_on_missing_or_malformed_tags() {
        let none = product(None, None, None);
        assert!(!filter(None, None, Some("ai")).matches(&none));

        let malformed = product(None, None, Some("not json"));
        assert!(!filter(None, None, Some("ai")).matches(&malformed));
    }
}
