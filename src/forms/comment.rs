use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    pub product_id: Uuid,
    #[validate(min_length = 1)]
    #[validate(max_length = 2000)]
    pub content: String,
}
