use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

// Author only; admins moderate products, not comments.
#[tracing::instrument(name = "Delete comment.")]
#[delete("/{id}")]
pub async fn delete_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::comment::CommentView>::build().unauthorized("Not authenticated")
    })?;

    let comment_id = path.0;
    let comment = db::comment::fetch(pg_pool.get_ref(), comment_id)
        .await
        .map_err(|_err| {
            JsonResponse::<views::comment::CommentView>::build().internal_server_error("")
        })?
        .ok_or_else(|| {
            JsonResponse::<views::comment::CommentView>::build().not_found("not found")
        })?;

    if comment.user_id != user.id {
        return Err(
            JsonResponse::<views::comment::CommentView>::build().forbidden("Not the author")
        );
    }

    db::comment::delete(pg_pool.get_ref(), comment.id)
        .await
        .map_err(|_err| {
            JsonResponse::<views::comment::CommentView>::build().internal_server_error("")
        })?;

    Ok(JsonResponse::<views::comment::CommentView>::build()
        .set_id(comment.id)
        .ok("Deleted"))
}
