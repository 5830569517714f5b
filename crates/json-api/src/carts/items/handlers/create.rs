//! Add Cart Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showroom_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{errors::into_status_error, handlers::get::CartResponse},
    extensions::*,
    state::State,
};

/// Cart line to add
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NewCartItemRequest {
    pub product_uuid: Uuid,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

impl From<NewCartItemRequest> for NewCartItem {
    fn from(request: NewCartItemRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_uuid.into(),
            color: request.color,
            size: request.size,
            quantity: request.quantity,
        }
    }
}

/// Add Cart Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemsRequest {
    pub items: Vec<NewCartItemRequest>,
}

/// Add Cart Items Handler
///
/// Lines matching an existing product, color and size have their quantities summed.
#[endpoint(
    tags("carts"),
    summary = "Add Items to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Items added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.create",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        items_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = json.into_inner();

    if request.items.is_empty() {
        return Err(StatusError::bad_request().brief("No items to add"));
    }

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(identity.user));
    span.record("items_count", request.items.len());

    let cart = state
        .app
        .carts
        .add_items(
            identity.user,
            request.items.into_iter().map(Into::into).collect(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use showroom_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::{
        carts::handlers::tests::make_summary,
        test_helpers::{TEST_USER_UUID, carts_service},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_items_returns_cart() -> TestResult {
        let product = ProductUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_add_items()
            .once()
            .withf(move |user, items| {
                *user == TEST_USER_UUID
                    && *items
                        == vec![NewCartItem {
                            product_uuid: product,
                            color: "Black".to_string(),
                            size: "M".to_string(),
                            quantity: 3,
                        }]
            })
            .return_once(|_, _| Ok(make_summary()));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "items": [{ "product_uuid": product.into_uuid(), "color": "Black", "size": "M", "quantity": 3 }]
            }))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items_by_designers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_no_items_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_items().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "items": [] }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_items()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "items": [{ "product_uuid": Uuid::nil(), "color": "Black", "size": "M", "quantity": 1 }]
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
