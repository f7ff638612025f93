use serde::{Deserialize, Serialize};

// Identity payload returned by the OAuth collaborator's userinfo
// endpoint; mirrored into the local users table on every sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountForm {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}
