//! Server-rendered storefront and cart pages.
//!
//! Form posts redirect back to `/cart` (303 See Other) once the change is stored.

use super::{AppResult, AppState, views};
use crate::core::{cart, catalog};
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;

/// Add-to-cart form fields
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: i32,
}

/// Quantity update form fields
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(browse_products))
        .route("/cart", get(view_cart).post(add_to_cart))
        .route("/update_cart/{id}", post(update_cart))
        .route("/remove_from_cart/{id}", post(remove_from_cart))
}

/// GET /
pub async fn browse_products(State(state): State<AppState>) -> AppResult<Html<String>> {
    let products =
        catalog::list_products(&state.db, state.settings.catalog.listing_policy).await?;
    Ok(Html(views::browse_page(&products)))
}

/// GET /cart
pub async fn view_cart(State(state): State<AppState>) -> AppResult<Html<String>> {
    let lines = cart::list_items(&state.db).await?;
    Ok(Html(views::cart_page(&lines)))
}

/// POST /cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> AppResult<Redirect> {
    cart::add_item(&state.db, form.product_id, form.quantity).await?;
    Ok(Redirect::to("/cart"))
}

/// POST /update_cart/{id}
pub async fn update_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<QuantityForm>,
) -> AppResult<Redirect> {
    cart::update_quantity(&state.db, id, form.quantity).await?;
    Ok(Redirect::to("/cart"))
}

/// POST /remove_from_cart/{id}
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    cart::remove_item(&state.db, id).await?;
    Ok(Redirect::to("/cart"))
}
