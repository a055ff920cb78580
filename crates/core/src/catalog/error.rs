//! Product catalog error types.

use thiserror::Error;
use vendra_shared::types::{ProductId, StoreId};

use crate::media::MediaError;

/// Product catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product not found.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Store not found.
    #[error("store not found: {0}")]
    StoreNotFound(StoreId),

    /// A product with the same name already exists in the store category.
    #[error("product already exists: {name}")]
    Duplicate {
        /// The conflicting product name.
        name: String,
    },

    /// Update carried no fields.
    #[error("at least one field must be provided for update")]
    EmptyUpdate,

    /// Media storage operation failed.
    #[error("media storage error: {0}")]
    Media(#[from] MediaError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl CatalogError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }

    /// Create a store not found error.
    #[must_use]
    pub fn store_not_found(id: StoreId) -> Self {
        Self::StoreNotFound(id)
    }

    /// Create a duplicate product error.
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::Duplicate { name: name.into() }
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
