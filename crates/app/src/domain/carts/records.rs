//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use showroom::cart::{CartLine, DesignerRef, ProductRef};
use thiserror::Error;

use crate::{auth::UserUuid, domain::products::records::ProductUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record. One per user, created on first add.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record, with the user owning its cart.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub owner: UserUuid,
    pub product_uuid: ProductUuid,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item joined to its product and designer.
///
/// Product and designer columns come from outer joins and are absent when the line no longer
/// resolves.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: Option<String>,
    pub product_slug: Option<String>,
    pub wholesale_price: Option<Decimal>,
    pub designer_name: Option<String>,
    pub designer_slug: Option<String>,
    pub designer_cover_image: Option<String>,
    pub minimum_order_quantity: Option<u32>,
    pub minimum_order_value: Option<Decimal>,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

/// A stored line that could not be joined to its product, designer or price.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cart item {0} does not resolve to a priced product")]
pub struct UnresolvedLine(pub CartItemUuid);

impl TryFrom<CartLineRecord> for CartLine {
    type Error = UnresolvedLine;

    fn try_from(record: CartLineRecord) -> Result<Self, Self::Error> {
        let (Some(name), Some(slug), Some(wholesale_price), Some(designer_name), Some(designer_slug)) = (
            record.product_name,
            record.product_slug,
            record.wholesale_price,
            record.designer_name,
            record.designer_slug,
        ) else {
            return Err(UnresolvedLine(record.uuid));
        };

        Ok(CartLine {
            id: record.uuid.into_uuid(),
            product: ProductRef {
                id: record.product_uuid.into_uuid(),
                name,
                slug,
                wholesale_price,
                designer: DesignerRef {
                    name: designer_name,
                    slug: designer_slug,
                    cover_image: record.designer_cover_image,
                    minimum_order_quantity: record.minimum_order_quantity,
                    minimum_order_value: record.minimum_order_value,
                },
            },
            color: record.color,
            size: record.size,
            quantity: record.quantity,
        })
    }
}
