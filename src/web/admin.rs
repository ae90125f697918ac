//! Admin panel: inventory listing and product add/edit/delete.
//!
//! Add and edit take `multipart/form-data` with the fields `name`, `description`,
//! `price`, `is_available` (present means true) and an optional `image` file.
//! A rejected image never fails the request; the product is saved without it and
//! the inventory page shows a notice instead.

use super::{AppError, AppResult, AppState, views};
use crate::core::{
    catalog::{self, ListingPolicy},
    product::{self, ProductInput},
    upload::{self, UploadOutcome},
};
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    response::{Html, Redirect},
    routing::get,
};
use serde::Deserialize;

/// Inventory query string; `notice=image_rejected` after a refused upload
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub notice: Option<String>,
}

const IMAGE_REJECTED: &str = "image_rejected";

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/admin/inventory", get(inventory))
        .route("/admin/add", get(add_form).post(add_product))
        .route("/admin/edit/{id}", get(edit_form).post(edit_product))
        .route("/admin/delete/{id}", get(delete_product))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Raw admin form contents before validation
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    is_available: bool,
    image_name: Option<String>,
    image: Bytes,
}

impl ProductForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "image" => {
                    form.image_name = field.file_name().map(str::to_string);
                    form.image = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                }
                "name" | "description" | "price" | "is_available" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    match field_name.as_str() {
                        "name" => form.name = Some(value),
                        "description" => form.description = Some(value),
                        "price" => form.price = Some(value),
                        _ => form.is_available = true,
                    }
                }
                other => tracing::debug!("Ignoring unexpected form field '{}'", other),
            }
        }

        Ok(form)
    }

    /// Splits the form into validated-shape input plus the image part.
    fn into_parts(self) -> AppResult<(ProductInput, Option<String>, Bytes)> {
        let name = self
            .name
            .ok_or_else(|| AppError::BadRequest("Missing form field 'name'".to_string()))?;
        let price_text = self
            .price
            .ok_or_else(|| AppError::BadRequest("Missing form field 'price'".to_string()))?;
        let price = price_text
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::BadRequest(format!("Price '{price_text}' is not a number")))?;

        let input = ProductInput {
            name,
            description: self.description.unwrap_or_default(),
            price,
            is_available: self.is_available,
        };
        Ok((input, self.image_name, self.image))
    }
}

fn inventory_redirect(outcome: &UploadOutcome) -> Redirect {
    if outcome.notable_rejection().is_some() {
        Redirect::to(&format!("/admin/inventory?notice={IMAGE_REJECTED}"))
    } else {
        Redirect::to("/admin/inventory")
    }
}

/// GET /admin/inventory
pub async fn inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Html<String>> {
    let products = catalog::list_products(&state.db, ListingPolicy::All).await?;
    let notice = (query.notice.as_deref() == Some(IMAGE_REJECTED)).then(|| {
        format!(
            "The uploaded image was not saved. Allowed types: {}.",
            state.settings.uploads.allowed_extensions.join(", ")
        )
    });
    Ok(Html(views::inventory_page(&products, notice.as_deref())))
}

/// GET /admin/add
pub async fn add_form() -> Html<String> {
    Html(views::product_form_page(None))
}

/// POST /admin/add
pub async fn add_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let (input, image_name, image) = ProductForm::read(multipart).await?.into_parts()?;
    input.validate()?;

    let outcome =
        upload::store_image(&state.settings.uploads, image_name.as_deref(), &image).await?;
    product::create_product(&state.db, input, outcome.image_url().map(str::to_string)).await?;

    Ok(inventory_redirect(&outcome))
}

/// GET /admin/edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let product = catalog::get_product(&state.db, id)
        .await?
        .ok_or(crate::errors::Error::ProductNotFound { id })?;
    Ok(Html(views::product_form_page(Some(&product))))
}

/// POST /admin/edit/{id}
pub async fn edit_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let (input, image_name, image) = ProductForm::read(multipart).await?.into_parts()?;
    input.validate()?;
    if catalog::get_product(&state.db, id).await?.is_none() {
        return Err(crate::errors::Error::ProductNotFound { id }.into());
    }

    let outcome =
        upload::store_image(&state.settings.uploads, image_name.as_deref(), &image).await?;
    product::update_product(&state.db, id, input, outcome.image_url().map(str::to_string))
        .await?;

    Ok(inventory_redirect(&outcome))
}

/// GET /admin/delete/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    product::delete_product(&state.db, id).await?;
    Ok(Redirect::to("/admin/inventory"))
}
