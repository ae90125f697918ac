//! JSON API handlers, mounted under `/api` with open CORS.

use super::{AppResult, AppState};
use crate::{
    core::{
        cart::{self, CartLine, QuantityUpdate},
        catalog,
    },
    entities::product,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

/// `{ "message": ... }` body returned by cart mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Product summary embedded in cart lines
#[derive(Debug, Serialize)]
pub struct CartProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// One line of `GET /api/cart`
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub id: i64,
    pub product: CartProduct,
    pub quantity: i32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            product: CartProduct {
                id: line.product.id,
                name: line.product.name,
                price: line.product.price,
            },
            quantity: line.quantity,
        }
    }
}

/// Body of `POST /api/cart`
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub product_id: i64,
    pub quantity: i32,
}

/// Body of `PUT /api/cart/{id}`
#[derive(Debug, Deserialize)]
pub struct UpdateCart {
    pub quantity: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/cart", get(get_cart).post(add_to_cart))
        .route("/cart/{id}", put(update_cart).delete(delete_cart_item))
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<product::Model>>> {
    let products =
        catalog::list_products(&state.db, state.settings.catalog.listing_policy).await?;
    Ok(Json(products))
}

/// GET /api/cart
pub async fn get_cart(State(state): State<AppState>) -> AppResult<Json<Vec<CartLineResponse>>> {
    let lines = cart::list_items(&state.db).await?;
    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// POST /api/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCart>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    cart::add_item(&state.db, payload.product_id, payload.quantity).await?;
    Ok((StatusCode::CREATED, MessageResponse::new("Item added to cart")))
}

/// PUT /api/cart/{id}
pub async fn update_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCart>,
) -> AppResult<Json<MessageResponse>> {
    let message = match cart::update_quantity(&state.db, id, payload.quantity).await? {
        QuantityUpdate::Updated(_) => "Cart updated",
        QuantityUpdate::Removed => "Item removed from cart",
    };
    Ok(MessageResponse::new(message))
}

/// DELETE /api/cart/{id}
pub async fn delete_cart_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    cart::remove_item(&state.db, id).await?;
    Ok(MessageResponse::new("Item removed from cart"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::test_utils::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_products_includes_unavailable() -> crate::errors::Result<()> {
        let app = TestApp::new().await?;
        create_test_product(&app.db, "Eggs", true).await?;
        create_test_product(&app.db, "Honey", false).await?;

        let response = app.request(Method::GET, "/api/products", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1]["name"], "Honey");
        assert_eq!(products[1]["is_available"], false);
        assert_eq!(products[1]["image_url"], "");
        assert!(products[0].get("created_at").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_lifecycle() -> crate::errors::Result<()> {
        let app = TestApp::new().await?;
        let eggs = create_custom_product(&app.db, "Eggs", 4.0, true).await?;

        for quantity in [2, 3] {
            let response = app
                .request(
                    Method::POST,
                    "/api/cart",
                    Some(json!({ "product_id": eggs.id, "quantity": quantity })),
                )
                .await;
            assert_eq!(response.status(), StatusCode::CREATED);
            assert_eq!(body_json(response).await["message"], "Item added to cart");
        }

        let body = body_json(app.request(Method::GET, "/api/cart", None).await).await;
        let lines = body.as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["quantity"], 5);
        assert_eq!(lines[0]["product"]["name"], "Eggs");
        assert_eq!(lines[0]["product"]["price"], 4.0);
        let line_id = lines[0]["id"].as_i64().unwrap();

        let response = app
            .request(
                Method::PUT,
                &format!("/api/cart/{line_id}"),
                Some(json!({ "quantity": 0 })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Item removed from cart");

        let body = body_json(app.request(Method::GET, "/api/cart", None).await).await;
        assert!(body.as_array().unwrap().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_line() -> crate::errors::Result<()> {
        let app = TestApp::new().await?;

        let response = app
            .request(Method::PUT, "/api/cart/9", Some(json!({ "quantity": 2 })))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");

        let response = app.request(Method::DELETE, "/api/cart/9", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_rejects_bad_quantity_and_unknown_product() -> crate::errors::Result<()> {
        let app = TestApp::new().await?;
        let eggs = create_test_product(&app.db, "Eggs", true).await?;

        let response = app
            .request(
                Method::POST,
                "/api/cart",
                Some(json!({ "product_id": eggs.id, "quantity": 0 })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .request(
                Method::POST,
                "/api/cart",
                Some(json!({ "product_id": 404, "quantity": 1 })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        crate::core::cart::add_item(&app.db, eggs.id, i32::MAX).await?;
        let response = app
            .request(
                Method::POST,
                "/api/cart",
                Some(json!({ "product_id": eggs.id, "quantity": 1 })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        Ok(())
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() -> crate::errors::Result<()> {
        let app = TestApp::new().await?;

        let response = app
            .request_with_origin(Method::GET, "/api/products", "http://elsewhere.example")
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );

        Ok(())
    }
}
