use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<NaiveDate>,
    pub agent: Option<String>,
    pub llm: Option<String>,
    pub tag: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> forms::Filter {
        forms::Filter {
            agent: self.agent.clone(),
            llm: self.llm.clone(),
            tag: self.tag.clone(),
        }
    }
}

// The launch board. Without a date: every approved product grouped by
// launch day, newest day first. With ?date=YYYY-MM-DD: that single day.
// Either way the response is a list of day groups ranked by votes.
#[tracing::instrument(name = "List products by launch date.")]
#[get("")]
pub async fn list_handler(
    viewer: Option<web::ReqData<Arc<models::User>>>,
    query: web::Query<ListQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let rows = match query.date {
        Some(date) => db::product::fetch_approved_by_date(pg_pool.get_ref(), date).await,
        None => db::product::fetch_approved(pg_pool.get_ref()).await,
    }
    .map_err(|_err| {
        JsonResponse::<views::product::DateGroup>::build().internal_server_error("")
    })?;

    let rows = query.filter().apply(rows);

    let viewer_votes =
        db::vote::viewer_set(pg_pool.get_ref(), viewer.as_ref().map(|u| u.id.as_str()))
            .await
            .map_err(|_err| {
                JsonResponse::<views::product::DateGroup>::build().internal_server_error("")
            })?;

    let cards = views::product::enrich(rows, &viewer_votes);
    let groups = views::product::group_by_date(cards);

    Ok(JsonResponse::build().set_list(groups).ok("OK"))
}

// Direct link lookup. Deliberately not status-gated: owners and admins
// follow their own links to pending or rejected products.
#[tracing::instrument(name = "Get product by slug.")]
#[get("/{slug}")]
pub async fn item_handler(
    viewer: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let slug = &path.0;
    let row = db::product::fetch_by_slug(pg_pool.get_ref(), slug)
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<views::product::Card>::build().not_found("not found"))?;

    let mut viewer_votes = HashSet::new();
    if let Some(viewer) = viewer.as_ref() {
        let voted = db::vote::exists(pg_pool.get_ref(), &viewer.id, row.product.id)
            .await
            .map_err(|_err| {
                JsonResponse::<views::product::Card>::build().internal_server_error("")
            })?;
        if voted {
            viewer_votes.insert(row.product.id);
        }
    }

    let card = views::product::Card::from_row(row, &viewer_votes);
    Ok(JsonResponse::build().set_id(card.id).set_item(card).ok("OK"))
}

// Moderation queue: all statuses, newest submission first.
#[tracing::instrument(name = "Admin list all products.")]
#[get("")]
pub async fn admin_list_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::product::Card>::build().unauthorized("Not authenticated")
    })?;
    if !user.is_admin() {
        return Err(JsonResponse::<views::product::Card>::build().forbidden("Admin role required"));
    }

    let rows = db::product::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?;

    let viewer_votes = db::vote::viewer_set(pg_pool.get_ref(), Some(user.id.as_str()))
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?;

    let cards = views::product::enrich(rows, &viewer_votes);
    Ok(JsonResponse::build().set_list(cards).ok("OK"))
}
