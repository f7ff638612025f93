use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    pub period: forms::TrendingPeriod,
    pub agent: Option<String>,
    pub llm: Option<String>,
    pub tag: Option<String>,
}

#[tracing::instrument(name = "List trending products.")]
#[get("/trending")]
pub async fn trending_handler(
    viewer: Option<web::ReqData<Arc<models::User>>>,
    query: web::Query<TrendingQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let since = query.period.since(chrono::Utc::now().date_naive());
    let rows = db::product::fetch_trending(pg_pool.get_ref(), since)
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?;

    let filter = forms::Filter {
        agent: query.agent.clone(),
        llm: query.llm.clone(),
        tag: query.tag.clone(),
    };
    let rows = filter.apply(rows);

    let viewer_votes =
        db::vote::viewer_set(pg_pool.get_ref(), viewer.as_ref().map(|u| u.id.as_str()))
            .await
            .map_err(|_err| {
                JsonResponse::<views::product::Card>::build().internal_server_error("")
            })?;

    let cards = views::product::enrich(rows, &viewer_votes);
    Ok(JsonResponse::build().set_list(cards).ok("OK"))
}
