//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showroom_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::get::OrderResponse},
    state::State,
};

/// Create Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Shipping address
    #[serde(default)]
    pub address_uuid: Option<Uuid>,

    /// Payment provider reference
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            address_uuid: request.address_uuid,
            payment_intent_id: request.payment_intent_id,
        }
    }
}

/// Create Order Handler
///
/// Places an order for the caller's current cart and clears the cart.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(identity.user));

    let order = state
        .app
        .orders
        .place_order(identity, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(serial_number = %order.serial_number, "placed order");

    Ok(Json(order.into()))
}
