//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showroom::cart::{CartSummary, ColorGroup, DesignerGroup, LineItem, ProductGroup, Subtotal};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines grouped by designer, then product, then color
    pub items_by_designers: Vec<DesignerGroupResponse>,

    /// Price times quantity per product
    pub subtotals: Vec<SubtotalResponse>,

    /// Sum of all line amounts
    pub total_amount: String,

    /// Total with the service fee, rounded to cents
    pub total_service_amount: String,

    /// Sum of line quantities
    pub total_item_count: u64,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        CartResponse {
            items_by_designers: summary
                .items_by_designers
                .into_iter()
                .map(Into::into)
                .collect(),
            subtotals: summary.subtotals.into_iter().map(Into::into).collect(),
            total_amount: summary.total_amount.to_string(),
            total_service_amount: summary.total_service_amount.to_string(),
            total_item_count: summary.total_item_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DesignerGroupResponse {
    pub name: String,
    pub slug: String,
    pub cover_image: Option<String>,
    pub minimum_order_quantity: Option<u32>,
    pub minimum_order_value: Option<String>,
    pub meets_minimum_quantity: bool,
    pub meets_minimum_value: bool,
    pub products: Vec<ProductGroupResponse>,
    pub total_quantity: u64,
    pub total_items: u32,
    pub total_amount: String,
}

impl From<DesignerGroup> for DesignerGroupResponse {
    fn from(designer: DesignerGroup) -> Self {
        DesignerGroupResponse {
            meets_minimum_quantity: designer.meets_minimum_quantity(),
            meets_minimum_value: designer.meets_minimum_value(),
            name: designer.name,
            slug: designer.slug,
            cover_image: designer.cover_image,
            minimum_order_quantity: designer.minimum_order_quantity,
            minimum_order_value: designer.minimum_order_value.as_ref().map(ToString::to_string),
            products: designer.products.into_iter().map(Into::into).collect(),
            total_quantity: designer.total_quantity,
            total_items: designer.total_items,
            total_amount: designer.total_amount.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductGroupResponse {
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub wholesale_price: String,
    pub colors: Vec<ColorGroupResponse>,
    pub total_quantity: u64,
}

impl From<ProductGroup> for ProductGroupResponse {
    fn from(product: ProductGroup) -> Self {
        ProductGroupResponse {
            product_id: product.product_id,
            name: product.name,
            slug: product.slug,
            wholesale_price: product.wholesale_price.to_string(),
            colors: product.colors.into_iter().map(Into::into).collect(),
            total_quantity: product.total_quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ColorGroupResponse {
    pub color: String,
    pub items: Vec<LineItemResponse>,
}

impl From<ColorGroup> for ColorGroupResponse {
    fn from(color: ColorGroup) -> Self {
        ColorGroupResponse {
            color: color.color,
            items: color.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineItemResponse {
    /// Cart line UUID
    pub id: Uuid,
    pub quantity: u32,
    pub size: String,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        LineItemResponse {
            id: item.id,
            quantity: item.quantity,
            size: item.size,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubtotalResponse {
    pub product_id: Uuid,
    pub value: String,
}

impl From<Subtotal> for SubtotalResponse {
    fn from(subtotal: Subtotal) -> Self {
        SubtotalResponse {
            product_id: subtotal.product_id,
            value: subtotal.value.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart grouped by designer.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart summary"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
