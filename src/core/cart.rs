//! Cart business logic - The single shared shopping cart.
//!
//! The cart holds at most one line per product. Adding a product that is
//! already in the cart increments the existing line with one
//! `INSERT .. ON CONFLICT(product_id) DO UPDATE` statement, so concurrent adds
//! cannot lose updates the way a read-then-write would. Quantities are always
//! positive: setting a line to zero or less deletes it.

use crate::{
    entities::{CartItem, Product, cart_item, product},
    errors::{Error, Result},
};
use sea_orm::{
    QueryOrder, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, OnConflict},
};
use serde::Serialize;

/// A cart line joined with the product it refers to
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartLine {
    /// Cart item ID
    pub id: i64,
    /// The referenced product
    pub product: product::Model,
    /// Number of units
    pub quantity: i32,
}

impl CartLine {
    /// Price of this line (`price * quantity`).
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// What [`update_quantity`] did to the line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now has the requested quantity
    Updated(cart_item::Model),
    /// The requested quantity was zero or negative, so the line was deleted
    Removed,
}

/// Adds `quantity` units of a product to the cart.
///
/// Creates a new line if the product is not in the cart yet, otherwise adds to
/// the existing line's quantity. There is no upper bound and no availability check.
///
/// # Errors
/// Returns an error if:
/// - `quantity` is less than 1, or the merged quantity would overflow `i32`
/// - The product does not exist
/// - The database upsert fails
pub async fn add_item(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: i32,
) -> Result<cart_item::Model> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    if Product::find_by_id(product_id).one(&txn).await?.is_none() {
        return Err(Error::ProductNotFound { id: product_id });
    }

    // The merged quantity must still fit the column type
    let existing = CartItem::find()
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(&txn)
        .await?;
    if let Some(existing) = existing {
        if existing.quantity.checked_add(quantity).is_none() {
            return Err(Error::InvalidQuantity { quantity });
        }
    }

    let line = cart_item::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(quantity),
        ..Default::default()
    };

    // quantity = cart_items.quantity + ? on an existing line
    CartItem::insert(line)
        .on_conflict(
            OnConflict::column(cart_item::Column::ProductId)
                .value(
                    cart_item::Column::Quantity,
                    Expr::col((CartItem, cart_item::Column::Quantity)).add(quantity),
                )
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

    let item = CartItem::find()
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    txn.commit().await?;

    tracing::info!(
        "Cart line {} now has {} x product {}",
        item.id,
        item.quantity,
        product_id
    );
    Ok(item)
}

/// Lists every cart line with its product, ordered by cart item ID.
///
/// # Errors
/// Returns an error if the query fails, or [`Error::ProductNotFound`] if a line
/// points at a product that no longer exists (prevented by the cascading
/// foreign key, but not assumed).
pub async fn list_items<C>(db: &C) -> Result<Vec<CartLine>>
where
    C: ConnectionTrait,
{
    CartItem::find()
        .find_also_related(Product)
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(item, product)| -> Result<CartLine> {
            let product = product.ok_or(Error::ProductNotFound {
                id: item.product_id,
            })?;
            Ok(CartLine {
                id: item.id,
                product,
                quantity: item.quantity,
            })
        })
        .collect()
}

/// Sets the quantity of a cart line, deleting it if `new_quantity <= 0`.
///
/// # Errors
/// Returns [`Error::CartItemNotFound`] if the line does not exist, or a
/// database error if the update or delete fails.
pub async fn update_quantity<C>(
    db: &C,
    cart_item_id: i64,
    new_quantity: i32,
) -> Result<QuantityUpdate>
where
    C: ConnectionTrait,
{
    let item = CartItem::find_by_id(cart_item_id)
        .one(db)
        .await?
        .ok_or(Error::CartItemNotFound { id: cart_item_id })?;

    if new_quantity <= 0 {
        CartItem::delete_by_id(item.id).exec(db).await?;
        tracing::info!("Removed cart line {} (quantity {})", item.id, new_quantity);
        return Ok(QuantityUpdate::Removed);
    }

    let mut item: cart_item::ActiveModel = item.into();
    item.quantity = Set(new_quantity);
    let updated = item.update(db).await?;
    tracing::info!("Cart line {} set to quantity {}", updated.id, updated.quantity);

    Ok(QuantityUpdate::Updated(updated))
}

/// Removes a cart line and returns it.
///
/// # Errors
/// Returns [`Error::CartItemNotFound`] if the line does not exist, or a
/// database error if the delete fails.
pub async fn remove_item<C>(db: &C, cart_item_id: i64) -> Result<cart_item::Model>
where
    C: ConnectionTrait,
{
    let item = CartItem::find_by_id(cart_item_id)
        .one(db)
        .await?
        .ok_or(Error::CartItemNotFound { id: cart_item_id })?;

    CartItem::delete_by_id(item.id).exec(db).await?;
    tracing::info!("Removed cart line {}", item.id);

    Ok(item)
}

/// Sum of all line subtotals.
#[must_use]
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::subtotal).sum()
}
