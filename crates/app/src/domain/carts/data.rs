//! Cart Data

use crate::domain::{carts::records::CartItemUuid, products::records::ProductUuid};

/// A line to add to the caller's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

/// A requested quantity for an existing line. Zero removes the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemQuantity {
    pub item: CartItemUuid,
    pub quantity: u32,
}

/// A line in a batch update that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemUpdateError {
    pub item: CartItemUuid,
    pub message: String,
}

/// Outcome of a batch quantity update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartItemsUpdate {
    pub updated: Vec<CartItemUuid>,
    pub errors: Vec<CartItemUpdateError>,
}
