use crate::db;
use crate::db::StoreError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;

#[tracing::instrument(name = "Edit product.")]
#[put("/{slug}")]
pub async fn update_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(String,)>,
    form: web::Json<forms::ProductForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::product::Card>::build().unauthorized("Not authenticated")
    })?;

    let form = form.into_inner().normalized();
    form.validate().map_err(|errors| {
        JsonResponse::<views::product::Card>::build().bad_request(errors.to_string())
    })?;

    let slug = &path.0;
    let row = db::product::fetch_by_slug(pg_pool.get_ref(), slug)
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?
        .ok_or_else(|| JsonResponse::<views::product::Card>::build().not_found("not found"))?;

    if row.product.user_id != user.id && !user.is_admin() {
        return Err(JsonResponse::<views::product::Card>::build().forbidden("Not the owner"));
    }

    let mut product = row.product;
    form.apply(&mut product);

    let product = db::product::update(pg_pool.get_ref(), product)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => {
                JsonResponse::<views::product::Card>::build().not_found("not found")
            }
            _ => JsonResponse::<views::product::Card>::build().internal_server_error(""),
        })?;

    let mut viewer_votes = HashSet::new();
    let voted = db::vote::exists(pg_pool.get_ref(), &user.id, product.id)
        .await
        .map_err(|_err| JsonResponse::<views::product::Card>::build().internal_server_error(""))?;
    if voted {
        viewer_votes.insert(product.id);
    }

    let row = models::ProductWithOwner {
        product,
        owner_name: row.owner_name,
        owner_username: row.owner_username,
        owner_avatar: row.owner_avatar,
    };
    let card = views::product::Card::from_row(row, &viewer_votes);

    Ok(JsonResponse::build()
        .set_id(card.id)
        .set_item(card)
        .ok("Saved"))
}
