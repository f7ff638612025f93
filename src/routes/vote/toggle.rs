use crate::db;
use crate::db::StoreError;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

// Flip the viewer's vote. A concurrent duplicate toggle loses the race
// at the unique constraint and comes back as a conflict; the counter
// stays consistent with the ledger either way.
#[tracing::instrument(name = "Toggle vote.")]
#[post("/{id}/shit")]
pub async fn toggle_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::vote::VoteState>::build().unauthorized("Not authenticated")
    })?;

    let product_id = path.0;
    let voted = db::vote::toggle(pg_pool.get_ref(), &user.id, product_id)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => {
                JsonResponse::<views::vote::VoteState>::build().not_found("Product not found")
            }
            StoreError::Duplicate => {
                JsonResponse::<views::vote::VoteState>::build().conflict("Already voted")
            }
            _ => JsonResponse::<views::vote::VoteState>::build().internal_server_error(""),
        })?;

    Ok(JsonResponse::build()
        .set_id(product_id)
        .set_item(views::vote::VoteState { voted })
        .ok("OK"))
}
