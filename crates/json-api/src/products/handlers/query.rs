//! Listing query parameters.

use std::str::FromStr;

use salvo::prelude::{Request, StatusError};

use showroom::filters::ListingFilters;

use crate::extensions::*;

/// Read listing facets from the query string. List facets are comma separated.
pub(super) fn listing_filters(req: &Request) -> Result<ListingFilters, StatusError> {
    let text = |name: &str| req.query::<String>(name);
    let list = |name: &str| text(name).as_deref().map(split_list).unwrap_or_default();

    Ok(ListingFilters {
        designers: list("designers"),
        collections: list("collections"),
        seasons: list("seasons"),
        years: text("years")
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
            .iter()
            .map(|year| year.parse::<i32>())
            .collect::<Result<Vec<i32>, _>>()
            .or_400("invalid value for `years`")?,
        order_type: text("order_type"),
        category: text("category"),
        subcategories: list("subcategories"),
        vertical: text("vertical"),
        colors: list("colors"),
        available: parse_flag(text("available"), "invalid value for `available`")?,
        curated: parse_flag(text("curated"), "invalid value for `curated`")?,
        wholesale_price_range: text("wholesale_price_range"),
        retail_price_range: text("retail_price_range"),
        sort_by_price: text("sort_by_price"),
        styles: list("styles"),
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: Option<String>, brief: &str) -> Result<Option<bool>, StatusError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(bool::from_str)
        .transpose()
        .or_400(brief)
}
