use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// Case-insensitive substring match on name or tagline over the
// approved board, most-voted first. A blank query is not a search;
// it returns nothing.
#[tracing::instrument(name = "Search products.")]
#[get("/search")]
pub async fn search_handler(
    viewer: Option<web::ReqData<Arc<models::User>>>,
    query: web::Query<SearchQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let term = query.q.as_deref().unwrap_or("").trim();
    if term.is_empty() {
        return Ok(JsonResponse::<views::product::Card>::build()
            .set_list(Vec::new())
            .ok("OK"));
    }

    let rows = db::product::search(pg_pool.get_ref(), term)
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?;

    let viewer_votes =
        db::vote::viewer_set(pg_pool.get_ref(), viewer.as_ref().map(|u| u.id.as_str()))
            .await
            .map_err(|_err| {
                JsonResponse::<views::product::Card>::build().internal_server_error("")
            })?;

    let cards = views::product::enrich(rows, &viewer_votes);
    Ok(JsonResponse::build().set_list(cards).ok("OK"))
}
