//! Batch Update Cart Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showroom_app::domain::carts::data::{CartItemQuantity, CartItemsUpdate};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemQuantityRequest {
    pub item: Uuid,

    /// New quantity. Zero removes the line.
    pub quantity: u32,
}

/// Batch Update Cart Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemsRequest {
    pub items: Vec<CartItemQuantityRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemErrorResponse {
    pub item: Uuid,
    pub message: String,
}

/// Batch Update Cart Items Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemsUpdatedResponse {
    /// Lines whose quantity was applied
    pub updated_items: Vec<Uuid>,

    /// Lines that could not be updated
    pub errors: Vec<CartItemErrorResponse>,
}

impl From<CartItemsUpdate> for CartItemsUpdatedResponse {
    fn from(update: CartItemsUpdate) -> Self {
        CartItemsUpdatedResponse {
            updated_items: update.updated.into_iter().map(Into::into).collect(),
            errors: update
                .errors
                .into_iter()
                .map(|error| CartItemErrorResponse {
                    item: error.item.into(),
                    message: error.message,
                })
                .collect(),
        }
    }
}

/// Batch Update Cart Items Handler
///
/// Applies each quantity independently and reports the lines that failed.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantities",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantities applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemsUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let updates = json
        .into_inner()
        .items
        .into_iter()
        .map(|request| CartItemQuantity {
            item: request.item.into(),
            quantity: request.quantity,
        })
        .collect();

    let outcome = state
        .app
        .carts
        .update_item_quantities(identity.user, updates)
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
