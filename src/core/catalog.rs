//! Catalog listing.
//!
//! Whether unavailable products appear on the public listings is an explicit
//! [`ListingPolicy`] rather than something each page decides for itself, so the
//! JSON API and the storefront always show the same set.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use serde::Deserialize;
use std::str::FromStr;

/// Which products a listing includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingPolicy {
    /// Every product, available or not
    #[default]
    All,
    /// Only products flagged `is_available`
    AvailableOnly,
}

impl FromStr for ListingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "available_only" => Ok(Self::AvailableOnly),
            other => Err(Error::Config {
                message: format!(
                    "Unknown listing policy '{other}', expected 'all' or 'available_only'"
                ),
            }),
        }
    }
}

/// Lists products according to `policy`, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products<C>(db: &C, policy: ListingPolicy) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Product::find().order_by_asc(product::Column::Id);
    if policy == ListingPolicy::AvailableOnly {
        query = query.filter(product::Column::IsAvailable.eq(true));
    }
    query.all(db).await.map_err(Into::into)
}

/// Retrieves a product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}
