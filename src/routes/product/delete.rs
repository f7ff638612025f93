use crate::db;
use crate::db::StoreError;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

// Owner or admin. Votes and comments disappear with the product via
// the cascade, so a toggle arriving after this returns NotFound.
#[tracing::instrument(name = "Delete product.")]
#[delete("/{slug}")]
pub async fn delete_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::product::Card>::build().unauthorized("Not authenticated")
    })?;

    let slug = &path.0;
    let row = db::product::fetch_by_slug(pg_pool.get_ref(), slug)
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<views::product::Card>::build().not_found("not found"))?;

    if row.product.user_id != user.id && !user.is_admin() {
        return Err(JsonResponse::<views::product::Card>::build().forbidden("Not the owner"));
    }

    db::product::delete(pg_pool.get_ref(), row.product.id)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => {
                JsonResponse::<views::product::Card>::build().not_found("not found")
            }
            _ => JsonResponse::<views::product::Card>::build().internal_server_error(""),
        })?;

    Ok(JsonResponse::<views::product::Card>::build()
        .set_id(row.product.id)
        .ok("Deleted"))
}
