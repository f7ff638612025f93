use crate::models;
use crate::views::product::Card;
use serde::Serialize;

// Public profile shape; role and timestamps stay internal.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<models::User> for Profile {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: Profile,
    pub products: Vec<Card>,
}
