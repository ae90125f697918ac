//! Product business logic - Admin-side product management.
//!
//! Provides create, edit and delete for catalog products. Image handling is done
//! by the caller through [`crate::core::upload`]; these functions only receive
//! the resulting `image_url` (if any). Deleting a product also removes its cart
//! line through the cascading foreign key on `cart_items`.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Editable product fields, as submitted by the admin forms
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    /// Product name, required
    pub name: String,
    /// Optional description, empty when not given
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Whether the product is for sale
    pub is_available: bool,
}

impl ProductInput {
    /// Checks the name is non-blank and the price is a finite, non-negative number.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for a blank name and [`Error::InvalidPrice`]
    /// for a negative or non-finite price.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Product name cannot be empty".to_string(),
            });
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidPrice { price: self.price });
        }

        Ok(())
    }
}

/// Creates a new product.
///
/// `image_url` is the stored upload path, or `None` when no valid image was
/// provided, in which case the product gets an empty `image_url`.
///
/// # Errors
/// Returns an error if validation fails or the insert fails.
pub async fn create_product<C>(
    db: &C,
    input: ProductInput,
    image_url: Option<String>,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    input.validate()?;

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        price: Set(input.price),
        image_url: Set(image_url.unwrap_or_default()),
        is_available: Set(input.is_available),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    tracing::info!("Created product {} ({})", created.id, created.name);

    Ok(created)
}

/// Overwrites every editable field of an existing product.
///
/// The image is only replaced when `new_image_url` is `Some`; otherwise the
/// previous `image_url` is kept as is.
///
/// # Errors
/// Returns an error if:
/// - Validation fails
/// - The product does not exist
/// - The database update fails
pub async fn update_product<C>(
    db: &C,
    product_id: i64,
    input: ProductInput,
    new_image_url: Option<String>,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    input.validate()?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.name = Set(input.name.trim().to_string());
    product.description = Set(input.description);
    product.price = Set(input.price);
    product.is_available = Set(input.is_available);
    if let Some(image_url) = new_image_url {
        product.image_url = Set(image_url);
    }
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = product.update(db).await?;
    tracing::info!("Updated product {} ({})", updated.id, updated.name);

    Ok(updated)
}

/// Deletes a product and returns the removed row.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if there is no such product, or a
/// database error if the delete fails.
pub async fn delete_product<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    Product::delete_by_id(product_id).exec(db).await?;
    tracing::info!("Deleted product {} ({})", product.id, product.name);

    Ok(product)
}
