//! Core business logic, independent of the HTTP layer.

/// Shared cart operations (merge-on-add, quantity updates, listing)
pub mod cart;
/// Public product listing
pub mod catalog;
/// Admin product management
pub mod product;
/// Image upload validation and storage
pub mod upload;
