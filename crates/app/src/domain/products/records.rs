//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use showroom::{facets::FacetSummaries, pagination::Paginated};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// A product as shown in a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub style: Option<String>,
    pub wholesale_price: Decimal,
    pub retail_price: Option<Decimal>,
    pub available: bool,
    pub curated: bool,
    pub designer: DesignerSummary,
    pub collection: CollectionSummary,
    pub category: Option<String>,
    pub vertical: Option<String>,

    /// Distinct variant color names, alphabetical.
    pub colors: Vec<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignerSummary {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub order_type: Option<String>,
}

/// One color of a product with the sizes it comes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub color: String,
    pub color_hex: Option<String>,
    pub sizes: Vec<String>,
    pub stock: i32,
}

/// A product with everything its detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: ProductRecord,

    /// Subcategory names, alphabetical.
    pub subcategories: Vec<String>,

    /// Variants ordered by color name.
    pub variants: Vec<VariantRecord>,
}

/// One page of a filtered listing with the facets of the whole filtered scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub products: Paginated<ProductRecord>,
    pub facets: FacetSummaries,
}
