use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::middleware::authentication::get_header;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use sqlx::PgPool;
use std::sync::Arc;

fn try_extract_token(authentication: String) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some("Bearer") => {}
        _ => return Err("Bearer scheme missing".to_string()),
    }
    let token = authentication_parts.next();
    if token.is_none() {
        tracing::error!("Bearer token is missing");
        return Err("Authentication required".to_string());
    }

    Ok(token.unwrap().into())
}

#[tracing::instrument(name = "Authenticate with bearer token")]
pub async fn try_bearer(req: &mut ServiceRequest) -> Result<bool, String> {
    let authentication = get_header::<String>(req, "authorization")?;
    if authentication.is_none() {
        return Ok(false);
    }

    let token = try_extract_token(authentication.unwrap())?;
    let settings = req.app_data::<web::Data<Settings>>().unwrap();
    let http_client = req.app_data::<web::Data<reqwest::Client>>().unwrap();
    let account =
        fetch_account(http_client.get_ref(), settings.auth_url.as_str(), &token).await?;

    // First sign-in creates the user row; later sign-ins refresh the
    // handle and avatar reported by the provider.
    let pg_pool = req.app_data::<web::Data<PgPool>>().unwrap();
    let user = db::user::upsert(
        pg_pool.get_ref(),
        &account.id,
        account.name.as_deref(),
        account.username.as_deref(),
        account.avatar_url.as_deref(),
    )
    .await
    .map_err(|err| format!("could not persist user: {err}"))?;

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}

pub async fn fetch_account(
    client: &reqwest::Client,
    auth_url: &str,
    token: &str,
) -> Result<forms::AccountForm, String> {
    let resp = client
        .get(auth_url)
        .bearer_auth(token)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| {
            tracing::error!(target: "auth", error = %err, "identity request failed");
            "No response from identity server".to_string()
        })?;

    if !resp.status().is_success() {
        return Err("401 Unauthorized".to_string());
    }

    resp.json::<forms::AccountForm>()
        .await
        .map_err(|_err| "can't parse the response body".to_string())
}
