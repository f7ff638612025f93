use crate::db;
use crate::db::StoreError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::models::ProductStatus;
use crate::views;
use actix_web::{put, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

// Moderation verdicts only move forward: a product can be approved or
// rejected, never sent back to pending.
#[tracing::instrument(name = "Admin set product status.")]
#[put("/{id}/status")]
pub async fn status_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::StatusForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.ok_or_else(|| {
        JsonResponse::<views::product::Card>::build().unauthorized("Not authenticated")
    })?;
    if !user.is_admin() {
        return Err(JsonResponse::<views::product::Card>::build().forbidden("Admin role required"));
    }

    if !matches!(
        form.status,
        ProductStatus::Approved | ProductStatus::Rejected
    ) {
        return Err(JsonResponse::<views::product::Card>::build()
            .bad_request("Status must be approved or rejected"));
    }

    let product_id = path.0;
    db::product::update_status(pg_pool.get_ref(), product_id, form.status)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => {
                JsonResponse::<views::product::Card>::build().not_found("not found")
            }
            _ => JsonResponse::<views::product::Card>::build().internal_server_error(""),
        })?;

    Ok(JsonResponse::<views::product::Card>::build()
        .set_id(product_id)
        .ok("Saved"))
}
