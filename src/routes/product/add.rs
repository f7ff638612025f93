use crate::db;
use crate::db::StoreError;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;

const SLUG_ATTEMPTS: usize = 3;

#[tracing::instrument(name = "Submit product.")]
#[post("")]
pub async fn add_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
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

    let base = helpers::slugify(&form.name);
    if base.is_empty() {
        return Err(JsonResponse::<views::product::Card>::build()
            .bad_request("Name must contain at least one letter or digit"));
    }

    let launch_date = chrono::Utc::now().date_naive();

    // Attempt the insert and let the unique constraint arbitrate slug
    // ownership; a concurrent submission with the same name shows up
    // as a duplicate, in which case we retry with a random suffix.
    let mut inserted = None;
    for attempt in 0..SLUG_ATTEMPTS {
        let slug = if attempt == 0 {
            base.clone()
        } else {
            helpers::suffixed_slug(&base)
        };
        let product = form.clone().into_product(&user.id, slug, launch_date);
        match db::product::insert(pg_pool.get_ref(), product).await {
            Ok(product) => {
                inserted = Some(product);
                break;
            }
            Err(StoreError::Duplicate) => continue,
            Err(_err) => {
                return Err(
                    JsonResponse::<views::product::Card>::build().internal_server_error("")
                );
            }
        }
    }

    let product = inserted.ok_or_else(|| {
        JsonResponse::<views::product::Card>::build().conflict("Could not allocate a unique slug")
    })?;

    tracing::info!("New product {} saved with slug {}", product.id, product.slug);

    let row = models::ProductWithOwner {
        product,
        owner_name: user.name.clone(),
        owner_username: user.username.clone(),
        owner_avatar: user.avatar_url.clone(),
    };
    let card = views::product::Card::from_row(row, &HashSet::new());

    Ok(JsonResponse::build()
        .set_id(card.id)
        .set_item(card)
        .created("Saved"))
}
