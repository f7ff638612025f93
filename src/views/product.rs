use crate::models;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

// A product as the boards render it: owner identity inlined, tags
// decoded, and has_voted resolved against the viewer's vote set.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
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
    pub tags: Vec<String>,
    pub user_id: String,
    pub launch_date: NaiveDate,
    pub shit_count: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub has_voted: bool,
    pub owner_name: Option<String>,
    pub owner_username: Option<String>,
    pub owner_avatar: Option<String>,
}

impl Card {
    pub fn from_row(row: models::ProductWithOwner, viewer_votes: &HashSet<Uuid>) -> Self {
        let tags = row.product.tag_list();
        let has_voted = viewer_votes.contains(&row.product.id);
        let p = row.product;
        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            tagline: p.tagline,
            description: p.description,
            url: p.url,
            logo_url: p.logo_url,
            banner_url: p.banner_url,
            github_url: p.github_url,
            agent: p.agent,
            llm: p.llm,
            tags,
            user_id: p.user_id,
            launch_date: p.launch_date,
            shit_count: p.shit_count,
            status: p.status,
            created_at: p.created_at,
            has_voted,
            owner_name: row.owner_name,
            owner_username: row.owner_username,
            owner_avatar: row.owner_avatar,
        }
    }
}

pub fn enrich(rows: Vec<models::ProductWithOwner>, viewer_votes: &HashSet<Uuid>) -> Vec<Card> {
    rows.into_iter()
        .map(|row| Card::from_row(row, viewer_votes))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub products: Vec<Card>,
}

// Buckets cards into launch-day groups. Cards must already be ordered
// by date (descending) with the in-day ranking applied, which is what
// the listing queries return; grouping preserves that order.
pub fn group_by_date(cards: Vec<Card>) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for card in cards {
        match groups.last_mut() {
            Some(group) if group.date == card.launch_date => group.products.push(card),
            _ => groups.push(DateGroup {
                date: card.launch_date,
                products: vec![card],
            }),
        }
    }
    groups
}
