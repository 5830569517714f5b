//! Favorite Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, favorites::errors::into_status_error,
    products::index::ProductResponse, state::State,
};

/// Favorite Index Handler
///
/// Returns the caller's favorite products, most recently added first.
#[endpoint(
    tags("favorites"),
    summary = "List Favorites",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Favorite products"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let products = state
        .app
        .favorites
        .list_favorites(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use showroom_app::domain::{favorites::MockFavoritesService, products::records::ProductUuid};

    use crate::{
        products::index::tests::make_product,
        test_helpers::{TEST_USER_UUID, favorites_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_index_returns_callers_favorites() -> TestResult {
        let uuid = ProductUuid::new();
        let mut favorites = MockFavoritesService::new();

        favorites
            .expect_list_favorites()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![make_product(uuid, Decimal::from(90))]));

        let response: Vec<ProductResponse> = TestClient::get("http://example.com/favorites")
            .send(&favorites_service(
                favorites,
                Router::with_path("favorites").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response.iter().map(|product| product.uuid).collect::<Vec<_>>(),
            vec![uuid.into_uuid()]
        );

        Ok(())
    }
}
