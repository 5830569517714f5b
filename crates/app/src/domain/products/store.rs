//! Catalog store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use showroom::{
    facets::{CollectionFacts, DesignerFacet, FacetSummaries},
    filters::CompiledFilter,
    pagination::Page,
};
use sqlx::{FromRow, Row, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        query,
        records::{CollectionSummary, DesignerSummary, ProductDetail, ProductRecord, VariantRecord},
    },
};

/// Read access to the product catalog for listings.
#[automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch one page of products matching `filter`, in its sort order.
    async fn query_products(
        &self,
        filter: &CompiledFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, sqlx::Error>;

    /// Count every product matching `filter`.
    async fn count_products(&self, filter: &CompiledFilter) -> Result<u64, sqlx::Error>;

    /// Compute facet lists over the products matching `filter`.
    async fn facet_summaries(
        &self,
        filter: &CompiledFilter,
    ) -> Result<FacetSummaries, sqlx::Error>;

    /// Look up one product with its subcategories and variants.
    async fn find_product(&self, slug: &str) -> Result<Option<ProductDetail>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    db: Db,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    #[tracing::instrument(
        name = "catalog.store.query_products",
        skip(self, filter),
        fields(page = page.number(), limit = page.limit()),
        err
    )]
    async fn query_products(
        &self,
        filter: &CompiledFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query::products(filter, page)
            .build_query_as::<ProductRecord>()
            .fetch_all(self.db.pool())
            .await
    }

    #[tracing::instrument(name = "catalog.store.count_products", skip_all, err)]
    async fn count_products(&self, filter: &CompiledFilter) -> Result<u64, sqlx::Error> {
        let count: i64 = query::count(filter)
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    #[tracing::instrument(name = "catalog.store.facet_summaries", skip_all, err)]
    async fn facet_summaries(
        &self,
        filter: &CompiledFilter,
    ) -> Result<FacetSummaries, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let collections: Vec<CollectionFacetRow> = query::collection_facets(filter)
            .build_query_as()
            .fetch_all(&mut *tx)
            .await?;

        let colors: Vec<String> = query::color_facets(filter)
            .build_query_scalar()
            .fetch_all(&mut *tx)
            .await?;

        let designers: Vec<(String, String)> = query::designer_facets(filter)
            .build_query_as()
            .fetch_all(&mut *tx)
            .await?;

        let categories: Vec<(String, String)> = query::category_facets(filter)
            .build_query_as()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(FacetSummaries::from_rows(
            collections.into_iter().map(|row| row.facts).collect(),
            colors,
            designers
                .into_iter()
                .map(|(name, slug)| DesignerFacet { name, slug }),
        )
        .with_category_tree(categories))
    }

    #[tracing::instrument(name = "catalog.store.find_product", skip(self), err)]
    async fn find_product(&self, slug: &str) -> Result<Option<ProductDetail>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let Some(product) = query::product_by_slug(slug)
            .build_query_as::<ProductRecord>()
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let subcategories: Vec<String> = query_scalar(query::PRODUCT_SUBCATEGORIES)
            .bind(product.uuid.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        let variants: Vec<VariantRecord> = query_as(query::PRODUCT_VARIANTS)
            .bind(product.uuid.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(ProductDetail {
            product,
            subcategories,
            variants,
        }))
    }
}

struct CollectionFacetRow {
    facts: CollectionFacts,
}

impl<'r> FromRow<'r, PgRow> for CollectionFacetRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            facts: CollectionFacts {
                name: row.try_get("name")?,
                season: row.try_get("season")?,
                year: row.try_get("year")?,
                order_type: row.try_get("order_type")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            color: row.try_get("color_name")?,
            color_hex: row.try_get("color_hex")?,
            sizes: row.try_get("sizes")?,
            stock: row.try_get("stock")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            style: row.try_get("style")?,
            wholesale_price: row.try_get("wholesale_price")?,
            retail_price: row.try_get("retail_price")?,
            available: row.try_get("available")?,
            curated: row.try_get("curated")?,
            designer: DesignerSummary {
                name: row.try_get("designer_name")?,
                slug: row.try_get("designer_slug")?,
            },
            collection: CollectionSummary {
                name: row.try_get("collection_name")?,
                season: row.try_get("season")?,
                year: row.try_get("year")?,
                order_type: row.try_get("order_type")?,
            },
            category: row.try_get("category_name")?,
            vertical: row.try_get("vertical_name")?,
            colors: row.try_get("color_names")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
