//! Product lifecycle bound to media storage.
//!
//! This module provides business logic for product management including:
//! - Creation with image upload
//! - Image replacement on update (upload new, swap reference, clean up old)
//! - Deletion with asset cleanup
//! - Lazy image URL resolution at read time

mod error;
mod service;
mod types;

pub use error::CatalogError;
pub use service::{ProductRepository, ProductService};
pub use types::{
    CreateProductInput, ImagePayload, ImageRef, NewProductRecord, Product, ProductChanges,
    ProductView, UpdateProductInput,
};
