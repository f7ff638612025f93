use crate::db;
use crate::db::StoreError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add comment.")]
#[post("")]
pub async fn add_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::CommentForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::comment::CommentView>::build().unauthorized("Not authenticated")
    })?;

    form.validate().map_err(|errors| {
        JsonResponse::<views::comment::CommentView>::build().bad_request(errors.to_string())
    })?;

    let comment = db::comment::insert(
        pg_pool.get_ref(),
        &user.id,
        form.product_id,
        form.content.trim(),
    )
    .await
    .map_err(|err| match err {
        StoreError::NotFound => {
            JsonResponse::<views::comment::CommentView>::build().not_found("Product not found")
        }
        _ => JsonResponse::<views::comment::CommentView>::build().internal_server_error(""),
    })?;

    let view = views::comment::CommentView::from(models::CommentWithAuthor {
        comment,
        author_name: user.name.clone(),
        author_username: user.username.clone(),
        author_avatar: user.avatar_url.clone(),
    });

    Ok(JsonResponse::build()
        .set_id(view.id)
        .set_item(view)
        .created("Saved"))
}
