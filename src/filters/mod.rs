//! Listing Filters
//!
//! Raw listing facets, exactly as a client sends them, are compiled into a typed
//! [`CompiledFilter`]. Compilation validates every literal up front so callers can reject a
//! request before touching storage.

use thiserror::Error;

mod price;
mod sort;

pub use price::{PriceBound, PricePredicate, RetailPriceRange, WholesalePriceRange};
pub use sort::{SortDirection, SortDirective};

/// Errors raised while compiling listing filters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A bucket or sort literal was not one of the accepted values.
    #[error("invalid value {value:?} for `{field}`")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,

        /// The rejected value.
        value: String,
    },
}

impl FilterError {
    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidArgument {
            field,
            value: value.to_string(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidArgument { field, .. } => field,
        }
    }
}

/// Listing facets as received. Every facet is optional; list facets match any of their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    /// Designer slugs.
    pub designers: Vec<String>,

    /// Collection names.
    pub collections: Vec<String>,

    /// Season names.
    pub seasons: Vec<String>,

    /// Collection years.
    pub years: Vec<i32>,

    /// Collection order type.
    pub order_type: Option<String>,

    /// Category name.
    pub category: Option<String>,

    /// Subcategory names.
    pub subcategories: Vec<String>,

    /// Vertical name.
    pub vertical: Option<String>,

    /// Variant color names.
    pub colors: Vec<String>,

    /// Availability flag.
    pub available: Option<bool>,

    /// Curated favourite flag.
    pub curated: Option<bool>,

    /// Wholesale price bucket literal.
    pub wholesale_price_range: Option<String>,

    /// Retail price bucket literal.
    pub retail_price_range: Option<String>,

    /// Sort by price literal, `asc` or `desc`.
    pub sort_by_price: Option<String>,

    /// Product styles, used to narrow the designers facet.
    pub styles: Vec<String>,
}

impl ListingFilters {
    /// Validate and compile the facets.
    ///
    /// Blank strings and blank list entries count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidArgument`] naming the field when a price bucket or sort
    /// literal is not recognised.
    pub fn compile(&self) -> Result<CompiledFilter, FilterError> {
        let price = PricePredicate {
            wholesale: present(self.wholesale_price_range.as_deref())
                .map(str::parse::<WholesalePriceRange>)
                .transpose()?
                .map(WholesalePriceRange::bound),
            retail: present(self.retail_price_range.as_deref())
                .map(str::parse::<RetailPriceRange>)
                .transpose()?
                .map(RetailPriceRange::bound),
        };

        let sort = present(self.sort_by_price.as_deref())
            .map(str::parse::<SortDirection>)
            .transpose()?
            .map_or(SortDirective::Default, SortDirective::WholesalePrice);

        let catalog = CatalogPredicate {
            designers: non_blank(&self.designers),
            collections: non_blank(&self.collections),
            seasons: non_blank(&self.seasons),
            years: self.years.clone(),
            order_type: present(self.order_type.as_deref()).map(str::to_string),
            category: present(self.category.as_deref()).map(str::to_string),
            subcategories: non_blank(&self.subcategories),
            vertical: present(self.vertical.as_deref()).map(str::to_string),
            available: self.available,
            curated: self.curated,
        };

        Ok(CompiledFilter {
            price,
            catalog,
            colors: ColorPredicate {
                colors: non_blank(&self.colors),
            },
            sort,
            styles: non_blank(&self.styles),
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Constraints along the designer, collection and category hierarchy.
///
/// Each present facet must match; list facets match when any value does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPredicate {
    /// Designer slugs.
    pub designers: Vec<String>,

    /// Collection names.
    pub collections: Vec<String>,

    /// Collection seasons.
    pub seasons: Vec<String>,

    /// Collection years.
    pub years: Vec<i32>,

    /// Collection order type.
    pub order_type: Option<String>,

    /// Category name.
    pub category: Option<String>,

    /// Subcategory names.
    pub subcategories: Vec<String>,

    /// Vertical name.
    pub vertical: Option<String>,

    /// Product availability.
    pub available: Option<bool>,

    /// Curated favorite flag.
    pub curated: Option<bool>,
}

impl CatalogPredicate {
    /// Whether any collection-level facet is set.
    pub fn constrains_collection(&self) -> bool {
        !self.collections.is_empty()
            || !self.seasons.is_empty()
            || !self.years.is_empty()
            || self.order_type.is_some()
    }

    /// Whether no facet is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Products must have a variant in one of these colors, when any are given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPredicate {
    /// Accepted variant color names.
    pub colors: Vec<String>,
}

impl ColorPredicate {
    /// Whether no color constraint is set.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Whether a product with the given variant colors passes.
    pub fn matches<'a>(&self, mut variant_colors: impl Iterator<Item = &'a str>) -> bool {
        self.is_empty() || variant_colors.any(|color| self.colors.iter().any(|c| c == color))
    }
}

/// A validated listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    /// Wholesale and retail price buckets.
    pub price: PricePredicate,

    /// Designer, collection and category facets.
    pub catalog: CatalogPredicate,

    /// Variant color facet.
    pub colors: ColorPredicate,

    /// Result order.
    pub sort: SortDirective,

    /// Styles narrowing the designers facet only.
    pub styles: Vec<String>,
}
