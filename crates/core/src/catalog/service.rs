//! Product service implementation.

use std::sync::Arc;

use tracing::warn;
use vendra_shared::types::{CategoryId, Page, PageRequest, ProductId, StoreId};

use super::error::CatalogError;
use super::types::{
    CreateProductInput, ImagePayload, ImageRef, NewProductRecord, Product, ProductChanges,
    ProductView, UpdateProductInput,
};
use crate::media::{DeleteOutcome, MediaStorage, UploadInput, UploadPolicy, UrlOptions};

/// Repository trait for product persistence.
///
/// This trait is implemented by the persistence layer to provide actual
/// database operations.
pub trait ProductRepository: Send + Sync {
    /// Insert a new product row.
    fn insert(
        &self,
        record: NewProductRecord,
    ) -> impl std::future::Future<Output = Result<Product, CatalogError>> + Send;

    /// Find product by ID.
    fn find_by_id(
        &self,
        id: ProductId,
    ) -> impl std::future::Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Check whether a product name is already taken in a store category.
    fn name_exists(
        &self,
        store_id: StoreId,
        category_id: CategoryId,
        name: &str,
    ) -> impl std::future::Future<Output = Result<bool, CatalogError>> + Send;

    /// Apply a field-level patch to a product row.
    fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> impl std::future::Future<Output = Result<Product, CatalogError>> + Send;

    /// Delete a product row. Returns whether a row was removed.
    fn delete(
        &self,
        id: ProductId,
    ) -> impl std::future::Future<Output = Result<bool, CatalogError>> + Send;

    /// Check if a store exists.
    fn store_exists(
        &self,
        store_id: StoreId,
    ) -> impl std::future::Future<Output = Result<bool, CatalogError>> + Send;

    /// List products of a store, newest first.
    fn list_by_store(
        &self,
        store_id: StoreId,
        offset: u64,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Product service binding catalog rows to media storage.
pub struct ProductService<R: ProductRepository> {
    storage: Arc<dyn MediaStorage>,
    repo: Arc<R>,
    policy: UploadPolicy,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a new product service with the default upload policy.
    #[must_use]
    pub fn new(storage: Arc<dyn MediaStorage>, repo: Arc<R>) -> Self {
        Self {
            storage,
            repo,
            policy: UploadPolicy::default(),
        }
    }

    /// Replaces the upload policy.
    #[must_use]
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates a product, uploading its image first when one is supplied.
    ///
    /// The row is either fully created with a valid image reference or not
    /// created at all: an upload failure aborts the create before anything
    /// is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A product with the same name exists in the store category
    /// - The image fails the upload policy or the upload itself fails
    /// - The repository insert fails
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<Product, CatalogError> {
        let taken = self
            .repo
            .name_exists(input.store_id, input.category_id, &input.name)
            .await?;
        if taken {
            return Err(CatalogError::duplicate(input.name));
        }

        let image = match input.image {
            Some(payload) => Some(self.upload_image(payload).await?),
            None => None,
        };

        let record = NewProductRecord {
            id: ProductId::new(),
            store_id: input.store_id,
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            image: image.clone(),
        };

        match self.repo.insert(record).await {
            Ok(product) => Ok(product),
            Err(err) => {
                // The row never materialized; reclaim the uploaded asset.
                if let Some(image) = image {
                    self.cleanup_asset(&image.id, "create rollback").await;
                }
                Err(err)
            }
        }
    }

    /// Updates price, stock and/or image of a product.
    ///
    /// A replacement image is uploaded before the old reference is touched,
    /// and the previous asset is deleted only once the new one is stored and
    /// referenced. Old-asset cleanup failures are logged, never surfaced:
    /// the update has already succeeded by then.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No field was provided
    /// - The product does not exist
    /// - The new image fails the upload policy or the upload fails
    /// - The repository update fails
    pub async fn update_product(
        &self,
        id: ProductId,
        input: UpdateProductInput,
    ) -> Result<Product, CatalogError> {
        if input.is_empty() {
            return Err(CatalogError::EmptyUpdate);
        }

        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(id))?;

        let new_image = match input.image {
            Some(payload) => Some(self.upload_image(payload).await?),
            None => None,
        };

        let changes = ProductChanges {
            price: input.price,
            stock: input.stock,
            image: new_image.clone(),
        };

        let updated = match self.repo.update(id, changes).await {
            Ok(product) => product,
            Err(err) => {
                if let Some(image) = new_image {
                    self.cleanup_asset(&image.id, "update rollback").await;
                }
                return Err(err);
            }
        };

        // The new asset is stored and referenced; the old one is now an
        // orphan candidate and its cleanup must not fail the update.
        if new_image.is_some() {
            if let Some(old_id) = current.image_id.as_deref() {
                self.cleanup_asset(old_id, "image replace").await;
            }
        }

        Ok(updated)
    }

    /// Deletes a product and its image asset.
    ///
    /// The asset goes first: a transport failure blocks the row deletion
    /// and surfaces to the caller (who may retry), while a provider-side
    /// `not found` means there is nothing to clean up and the row deletion
    /// proceeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The product does not exist
    /// - The asset delete fails in transport
    /// - The repository delete fails
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(id))?;

        if let Some(image_id) = product.image_id.as_deref() {
            match self.storage.delete(image_id).await? {
                DeleteOutcome::Deleted => {}
                DeleteOutcome::NotFound => {
                    warn!(product_id = %id, image_id, "image asset already gone");
                }
            }
        }

        self.repo.delete(id).await?;
        Ok(())
    }

    /// Fetches a product and resolves its display URL.
    ///
    /// URL resolution is lazy: derived at read time from the stored asset
    /// id and the given rendering options, never cached on the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the repository
    /// fails.
    pub async fn get_product(
        &self,
        id: ProductId,
        opts: &UrlOptions,
    ) -> Result<ProductView, CatalogError> {
        let product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(id))?;

        Ok(self.resolve_view(product, opts))
    }

    /// Lists a store's products, newest first, with display URLs resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist or the repository
    /// fails.
    pub async fn list_products(
        &self,
        store_id: StoreId,
        request: PageRequest,
    ) -> Result<Page<ProductView>, CatalogError> {
        if !self.repo.store_exists(store_id).await? {
            return Err(CatalogError::store_not_found(store_id));
        }

        let rows = self
            .repo
            .list_by_store(store_id, request.offset(), request.fetch_limit())
            .await?;

        let opts = UrlOptions::default();
        Ok(Page::from_rows(rows, &request).map(|product| self.resolve_view(product, &opts)))
    }

    async fn upload_image(&self, payload: ImagePayload) -> Result<ImageRef, CatalogError> {
        let size = u64::try_from(payload.data.len()).unwrap_or(u64::MAX);
        self.policy.validate(&payload.content_type, size)?;

        let uploaded = self
            .storage
            .upload(
                UploadInput::new(payload.data)
                    .with_content_type(payload.content_type)
                    .with_folder("products"),
            )
            .await?;

        Ok(ImageRef {
            id: uploaded.id,
            provider: self.storage.provider_name().to_string(),
        })
    }

    /// Best-effort asset removal on paths where the primary operation has
    /// already been decided; failures go to the log, not the caller.
    async fn cleanup_asset(&self, asset_id: &str, context: &str) {
        match self.storage.delete(asset_id).await {
            Ok(DeleteOutcome::Deleted) => {}
            Ok(DeleteOutcome::NotFound) => {
                warn!(asset_id, context, "asset already gone during cleanup");
            }
            Err(err) => {
                warn!(asset_id, context, error = %err, "orphan asset cleanup failed");
            }
        }
    }

    fn resolve_view(&self, product: Product, opts: &UrlOptions) -> ProductView {
        let image_url = product
            .image_id
            .as_deref()
            .map(|image_id| self.storage.url(image_id, opts));

        ProductView { product, image_url }
    }
}
