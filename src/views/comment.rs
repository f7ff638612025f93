use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub author_name: Option<String>,
    pub author_username: Option<String>,
    pub author_avatar: Option<String>,
}

impl From<models::CommentWithAuthor> for CommentView {
    fn from(row: models::CommentWithAuthor) -> Self {
        Self {
            id: row.comment.id,
            product_id: row.comment.product_id,
            content: row.comment.content,
            created_at: row.comment.created_at,
            user_id: row.comment.user_id,
            author_name: row.author_name,
            author_username: row.author_username,
            author_avatar: row.author_avatar,
        }
    }
}
