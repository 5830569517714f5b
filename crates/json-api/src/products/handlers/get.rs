//! Product Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use showroom_app::domain::products::records::{ProductDetail, VariantRecord};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::index::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub color: String,
    pub color_hex: Option<String>,
    pub sizes: Vec<String>,
    pub stock: i32,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        VariantResponse {
            color: variant.color,
            color_hex: variant.color_hex,
            sizes: variant.sizes,
            stock: variant.stock,
        }
    }
}

/// Product Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub subcategories: Vec<String>,
    pub variants: Vec<VariantResponse>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        ProductDetailResponse {
            product: detail.product.into(),
            subcategories: detail.subcategories,
            variants: detail.variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Detail Handler
///
/// Returns one product by slug with its subcategories and variants.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .catalog
        .get_product(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
