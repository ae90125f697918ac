use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("Cart item {id} not found")]
    CartItemNotFound { id: i64 },

    #[error("Invalid price: {price}")]
    InvalidPrice { price: f64 },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i32 },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    /// True for errors caused by referencing a row that does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. } | Self::CartItemNotFound { .. }
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
