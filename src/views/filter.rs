use crate::models;
use serde::Serialize;
use std::collections::BTreeSet;

// The facet values the filter bar offers: distinct agents, distinct
// LLMs, and the union of all tag lists across approved products, each
// alphabetically sorted.
#[derive(Debug, Default, Serialize)]
pub struct FilterOptions {
    pub agents: Vec<String>,
    pub llms: Vec<String>,
    pub tags: Vec<String>,
}

impl FilterOptions {
    pub fn collect(rows: &[models::FacetSource]) -> Self {
        let mut agents = BTreeSet::new();
        let mut llms = BTreeSet::new();
        let mut tags = BTreeSet::new();

        for row in rows {
            if let Some(agent) = row.agent.as_deref() {
                agents.insert(agent.to_string());
            }
            if let Some(llm) = row.llm.as_deref() {
                llms.insert(llm.to_string());
            }
            for tag in models::product::decode_tags(row.tags.as_deref()) {
                tags.insert(tag);
            }
        }

        Self {
            agents: agents.into_iter().collect(),
            llms: llms.into_iter().collect(),
            tags: tags.into_iter().collect(),
        }
    }
}
