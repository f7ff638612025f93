use crate::db;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Get filter facets.")]
#[get("/filters")]
pub async fn filter_options_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let rows = db::product::fetch_facet_sources(pg_pool.get_ref())
        .await
        .map_err(|_err| {
            JsonResponse::<views::filter::FilterOptions>::build().internal_server_error("")
        })?;

    let options = views::filter::FilterOptions::collect(&rows);
    Ok(JsonResponse::build().set_item(options).ok("OK"))
}
