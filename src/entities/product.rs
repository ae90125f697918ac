//! Product entity - Represents an item in the shop catalog.
//!
//! Products are created, edited and deleted from the admin panel and listed on
//! the storefront. `image_url` holds a relative path into the upload directory,
//! or an empty string when no valid image was ever uploaded.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Free Range Eggs")
    pub name: String,
    /// Free-form description, empty when not provided
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Unit price, never negative
    pub price: f64,
    /// Relative path of the uploaded image (e.g., `static/uploads/eggs.png`)
    pub image_url: String,
    /// Whether the product is offered for sale
    pub is_available: bool,
    /// When the product was created
    #[serde(skip_serializing)]
    pub created_at: DateTime,
    /// When the product was last modified
    #[serde(skip_serializing)]
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product can sit in the cart (at most one line, see `cart_item`)
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
