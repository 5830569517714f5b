//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showroom::{
    facets::{CollectionFacts, DesignerFacet, SeasonYear, VerticalFacet},
    pagination::Page,
};
use showroom_app::domain::products::records::{ProductListing, ProductRecord};

use crate::{
    extensions::*, products::errors::into_status_error, products::handlers::query, state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub style: Option<String>,

    /// Wholesale price as a decimal string
    pub wholesale_price: String,

    /// Suggested retail price as a decimal string
    pub retail_price: Option<String>,
    pub available: bool,
    pub curated: bool,
    pub designer: DesignerFacetResponse,
    pub collection: CollectionResponse,
    pub category: Option<String>,
    pub vertical: Option<String>,
    pub colors: Vec<String>,
    pub created_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            slug: product.slug,
            style: product.style,
            wholesale_price: product.wholesale_price.to_string(),
            retail_price: product.retail_price.as_ref().map(ToString::to_string),
            available: product.available,
            curated: product.curated,
            designer: DesignerFacetResponse {
                name: product.designer.name,
                slug: product.designer.slug,
            },
            collection: CollectionResponse {
                name: product.collection.name,
                season: product.collection.season,
                year: product.collection.year,
                order_type: product.collection.order_type,
            },
            category: product.category,
            vertical: product.vertical,
            colors: product.colors,
            created_at: product.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DesignerFacetResponse {
    pub name: String,
    pub slug: String,
}

impl From<DesignerFacet> for DesignerFacetResponse {
    fn from(designer: DesignerFacet) -> Self {
        DesignerFacetResponse {
            name: designer.name,
            slug: designer.slug,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionResponse {
    pub name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub order_type: Option<String>,
}

impl From<CollectionFacts> for CollectionResponse {
    fn from(collection: CollectionFacts) -> Self {
        CollectionResponse {
            name: collection.name,
            season: collection.season,
            year: collection.year,
            order_type: collection.order_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SeasonResponse {
    pub season: String,

    /// Collection year, `0` when unknown
    pub year: i32,
}

impl From<SeasonYear> for SeasonResponse {
    fn from(season: SeasonYear) -> Self {
        SeasonResponse {
            season: season.season,
            year: season.year,
        }
    }
}

/// A vertical and the categories under it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerticalResponse {
    pub name: String,
    pub categories: Vec<String>,
}

impl From<VerticalFacet> for VerticalResponse {
    fn from(vertical: VerticalFacet) -> Self {
        VerticalResponse {
            name: vertical.name,
            categories: vertical.categories,
        }
    }
}

/// One page of products with facet lists over the whole filtered listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The requested page of products
    pub products: Vec<ProductResponse>,

    /// Products matching the filters across all pages
    pub total_products: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub collections: Vec<CollectionResponse>,
    pub designers: Vec<DesignerFacetResponse>,
    pub category_tree: Vec<VerticalResponse>,
    pub filter_colors: Vec<String>,
    pub order_types: Vec<String>,
    pub seasons: Vec<SeasonResponse>,
}

impl From<ProductListing> for ProductsResponse {
    fn from(listing: ProductListing) -> Self {
        let products = listing.products;
        let facets = listing.facets;

        ProductsResponse {
            products: products.items.into_iter().map(Into::into).collect(),
            total_products: products.total,
            total_pages: products.total_pages,
            current_page: products.page,
            collections: facets.collections.into_iter().map(Into::into).collect(),
            designers: facets.designers.into_iter().map(Into::into).collect(),
            category_tree: facets.category_tree.into_iter().map(Into::into).collect(),
            filter_colors: facets.colors,
            order_types: facets.order_types,
            seasons: facets.seasons.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Index Handler
///
/// Returns one page of products matching the facet filters, with facet summaries.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filters = query::listing_filters(req)?;
    let page = Page::new(page.into_inner(), limit.into_inner());

    let listing = state
        .app
        .catalog
        .list_products(filters, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(listing.into()))
}
