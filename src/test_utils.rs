//! Shared test utilities.
//!
//! Helpers for setting up in-memory test databases, creating products with
//! sensible defaults and driving the HTTP router without a socket.

#![allow(clippy::unwrap_used)]

use crate::{
    config::Settings,
    core::{
        catalog::ListingPolicy,
        product::{self, ProductInput},
    },
    entities,
    errors::Result,
    web::AppState,
};
use axum::{
    body::Body,
    http::{Method, Request, header},
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a [`ProductInput`] with an empty description and `is_available` set.
pub fn product_input(name: &str, price: f64) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: String::new(),
        price,
        is_available: true,
    }
}

/// Creates a test product priced at 10.0 with no image.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    is_available: bool,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, 10.0, is_available).await
}

/// Creates a test product with a custom price and no image.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    is_available: bool,
) -> Result<entities::product::Model> {
    let input = ProductInput {
        is_available,
        ..product_input(name, price)
    };
    product::create_product(db, input, None).await
}

/// Sets up a database holding a single available product.
/// Returns (db, product) for cart tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product", true).await?;
    Ok((db, product))
}

/// Router plus its backing database and a throwaway upload directory.
pub struct TestApp {
    /// Database shared with the router
    pub db: DatabaseConnection,
    router: axum::Router,
    uploads: tempfile::TempDir,
}

impl TestApp {
    /// App with default settings, an in-memory database and a temp upload dir.
    pub async fn new() -> Result<Self> {
        Self::with_policy(ListingPolicy::All).await
    }

    /// Same as [`TestApp::new`] with a specific catalog listing policy.
    pub async fn with_policy(policy: ListingPolicy) -> Result<Self> {
        let db = setup_test_db().await?;
        let uploads = tempfile::tempdir()?;

        let mut settings = Settings::default();
        settings.database_url = "sqlite::memory:".to_string();
        settings.uploads.dir = uploads.path().to_path_buf();
        settings.catalog.listing_policy = policy;

        let router = crate::web::build_app_router(AppState::new(db.clone(), settings));
        Ok(Self {
            db,
            router,
            uploads,
        })
    }

    /// Directory uploads are written to.
    pub fn upload_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Sends a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, json: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match json {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(request).await
    }

    /// Sends a request carrying an `Origin` header.
    pub async fn request_with_origin(&self, method: Method, uri: &str, origin: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Sends an `application/x-www-form-urlencoded` body.
    pub async fn form(&self, method: Method, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POSTs a `multipart/form-data` body with text fields and an optional `image` file.
    pub async fn multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &[u8])>,
    ) -> Response {
        const BOUNDARY: &str = "farm-shop-test-boundary";

        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Reads a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
