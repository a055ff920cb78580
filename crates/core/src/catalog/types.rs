//! Product catalog types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vendra_shared::types::{CategoryId, ProductId, StoreId};

/// Product domain model.
///
/// `image_id` and `image_provider` are set together or not at all; the id
/// is only ever one returned by the storage provider named alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Store the product belongs to.
    pub store_id: StoreId,
    /// Category within the store.
    pub category_id: CategoryId,
    /// Display name, unique within a store category.
    pub name: String,
    /// Description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
    /// Provider-assigned image asset id.
    pub image_id: Option<String>,
    /// Provider that issued `image_id`.
    pub image_provider: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Binary image data supplied with a create or update.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Raw image bytes.
    pub data: Bytes,
    /// Declared MIME type.
    pub content_type: String,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Store the product belongs to.
    pub store_id: StoreId,
    /// Category within the store.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
    /// Product image, uploaded before the row is persisted.
    pub image: Option<ImagePayload>,
}

/// Input for updating a product. At least one field must be provided.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// New unit price.
    pub price: Option<Decimal>,
    /// New stock level.
    pub stock: Option<i32>,
    /// Replacement image; the previous asset is cleaned up best-effort.
    pub image: Option<ImagePayload>,
}

impl UpdateProductInput {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.stock.is_none() && self.image.is_none()
    }
}

/// Reference to a stored image asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Provider-assigned asset id.
    pub id: String,
    /// Provider that issued the id.
    pub provider: String,
}

/// Record handed to the repository when inserting a product row.
#[derive(Debug, Clone)]
pub struct NewProductRecord {
    /// Pre-generated product id.
    pub id: ProductId,
    /// Store the product belongs to.
    pub store_id: StoreId,
    /// Category within the store.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
    /// Image reference, when an image was uploaded.
    pub image: Option<ImageRef>,
}

/// Field-level patch handed to the repository on update.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    /// New unit price.
    pub price: Option<Decimal>,
    /// New stock level.
    pub stock: Option<i32>,
    /// New image reference.
    pub image: Option<ImageRef>,
}

/// Product enriched with its display URL, resolved at read time.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    /// The product row.
    #[serde(flatten)]
    pub product: Product,
    /// Delivery URL for the product image, when one exists.
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateProductInput::default().is_empty());

        let update = UpdateProductInput {
            stock: Some(5),
            ..UpdateProductInput::default()
        };
        assert!(!update.is_empty());
    }
}
