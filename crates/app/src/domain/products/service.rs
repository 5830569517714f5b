//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use showroom::{
    filters::ListingFilters,
    pagination::{Page, Paginated},
};
use tracing::debug;

use crate::{
    database::Db,
    domain::products::{
        errors::CatalogServiceError,
        records::{ProductDetail, ProductListing},
        store::{CatalogStore, PgCatalogStore},
    },
};

/// Lists products through a [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct PgCatalogService<S = PgCatalogStore> {
    store: S,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            store: PgCatalogStore::new(db),
        }
    }
}

impl<S: CatalogStore> PgCatalogService<S> {
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: CatalogStore> CatalogService for PgCatalogService<S> {
    async fn list_products(
        &self,
        filters: ListingFilters,
        page: Page,
    ) -> Result<ProductListing, CatalogServiceError> {
        let filter = filters.compile()?;

        let (total, facets) = tokio::try_join!(
            self.store.count_products(&filter),
            self.store.facet_summaries(&filter),
        )?;

        let products = if page.offset() < total {
            self.store.query_products(&filter, page).await?
        } else {
            Vec::new()
        };

        debug!(total, page = page.number(), "listed products");

        Ok(ProductListing {
            products: Paginated::new(products, total, page),
            facets,
        })
    }

    async fn get_product(&self, slug: &str) -> Result<ProductDetail, CatalogServiceError> {
        self.store
            .find_product(slug)
            .await?
            .ok_or(CatalogServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Validate `filters` and return one page of matching products with facet summaries.
    ///
    /// Invalid filters are rejected before the store is queried.
    async fn list_products(
        &self,
        filters: ListingFilters,
        page: Page,
    ) -> Result<ProductListing, CatalogServiceError>;

    /// One product by slug, with its subcategories and variants.
    async fn get_product(&self, slug: &str) -> Result<ProductDetail, CatalogServiceError>;
}
