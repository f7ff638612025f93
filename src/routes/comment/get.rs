use crate::db;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "List comments for product.")]
#[get("/{id}/comments")]
pub async fn list_handler(
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let product_id = path.0;
    let comments = db::comment::fetch_by_product(pg_pool.get_ref(), product_id)
        .await
        .map_err(|_err| {
            JsonResponse::<views::comment::CommentView>::build().internal_server_error("")
        })?;

    let views: Vec<views::comment::CommentView> =
        comments.into_iter().map(Into::into).collect();

    Ok(JsonResponse::build().set_list(views).ok("OK"))
}
