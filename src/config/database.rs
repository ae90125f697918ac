//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the unique cart constraint and the cascading foreign key declared on
//! `cart_item` end up in the schema without hand-written SQL.

use crate::entities::{CartItem, Product};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first, since
/// `SQLite` will create the file but not the directories leading to it.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_parent(database_url) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::info!("Creating database directory {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }

    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables if they do not exist yet.
///
/// Products are created before cart items because `cart_items` references them.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    let mut cart_item_table = schema.create_table_from_entity(CartItem);
    product_table.if_not_exists();
    cart_item_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&cart_item_table)).await?;

    Ok(())
}

/// Connects and makes sure the schema exists.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}

fn sqlite_file_parent(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Path::new(path).parent()
}
