//! App Router

use salvo::Router;

use crate::{auth, carts, favorites, healthcheck, orders, products};

/// Every API route. Everything except the healthcheck and the product routes requires a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{slug}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .put(carts::items::update_many::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("products/{product}")
                                .delete(carts::remove_product::handler),
                        ),
                )
                .push(
                    Router::with_path("favorites")
                        .get(favorites::index::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(favorites::update::handler)
                                .delete(favorites::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(
                                    Router::with_path("status").put(orders::update_status::handler),
                                ),
                        ),
                ),
        )
}
