//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showroom_app::domain::orders::records::{OrderDetailRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,

    /// Human-readable order reference
    pub serial_number: String,
    pub status: String,
    pub payment_status: String,

    /// Cart total with the service fee
    pub total_amount: String,
    pub address_uuid: Option<Uuid>,
    pub payment_intent_id: Option<String>,
    pub order_date: String,
    pub details: Vec<OrderDetailResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user.into(),
            serial_number: order.serial_number,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            total_amount: order.total_amount.to_string(),
            address_uuid: order.address_uuid,
            payment_intent_id: order.payment_intent_id,
            order_date: order.order_date.to_string(),
            details: order.details.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailResponse {
    pub uuid: Uuid,
    pub designer: String,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,

    /// Unit wholesale price when ordered
    pub price: String,
}

impl From<OrderDetailRecord> for OrderDetailResponse {
    fn from(detail: OrderDetailRecord) -> Self {
        OrderDetailResponse {
            uuid: detail.uuid.into(),
            designer: detail.designer,
            product_name: detail.product_name,
            size: detail.size,
            color: detail.color,
            quantity: detail.quantity,
            price: detail.price.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one order. Only its buyer or an admin may read it.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .get_order(identity, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
