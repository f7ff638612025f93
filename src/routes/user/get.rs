use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

// Profile page: the user record plus everything they submitted, every
// status, newest first. Unknown handles are a 404 here.
#[tracing::instrument(name = "Get user profile.")]
#[get("/{username}")]
pub async fn item_handler(
    viewer: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let username = &path.0;
    let user = db::user::fetch_by_username(pg_pool.get_ref(), username)
        .await
        .map_err(|_err| {
            JsonResponse::<views::user::ProfileView>::build().internal_server_error("")
        })?
        .ok_or_else(|| JsonResponse::<views::user::ProfileView>::build().not_found("not found"))?;

    let rows = db::product::fetch_by_owner(pg_pool.get_ref(), &user.id)
        .await
        .map_err(|_err| {
            JsonResponse::<views::user::ProfileView>::build().internal_server_error("")
        })?;

    let viewer_votes =
        db::vote::viewer_set(pg_pool.get_ref(), viewer.as_ref().map(|u| u.id.as_str()))
            .await
            .map_err(|_err| {
                JsonResponse::<views::user::ProfileView>::build().internal_server_error("")
            })?;

    let products = views::product::enrich(rows, &viewer_votes);
    let view = views::user::ProfileView {
        user: views::user::Profile::from(user),
        products,
    };

    Ok(JsonResponse::build().set_item(view).ok("OK"))
}

// Products this user has shat on, most-voted first. An unknown handle
// yields an empty list, not an error.
#[tracing::instrument(name = "Get products voted by user.")]
#[get("/{username}/shits")]
pub async fn voted_handler(
    viewer: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let username = &path.0;
    let user = db::user::fetch_by_username(pg_pool.get_ref(), username)
        .await
        .map_err(|_err| {
            JsonResponse::<views::product::Card>::build().internal_server_error("")
        })?;

    let rows = match user {
        Some(user) => db::product::fetch_voted_by_user(pg_pool.get_ref(), &user.id)
            .await
            .map_err(|_err| {
                JsonResponse::<views::product::Card>::build().internal_server_error("")
            })?,
        None => Vec::new(),
    };

    let viewer_votes =
        db::vote::viewer_set(pg_pool.get_ref(), viewer.as_ref().map(|u| u.id.as_str()))
            .await
            .map_err(|_err| {
                JsonResponse::<views::product::Card>::build().internal_server_error("")
            })?;

    let cards = views::product::enrich(rows, &viewer_votes);
    Ok(JsonResponse::build().set_list(cards).ok("OK"))
}
