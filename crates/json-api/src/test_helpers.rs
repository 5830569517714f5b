//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use showroom_app::{
    auth::{Identity, MockAuthService, Role, UserUuid},
    context::AppContext,
    domain::{
        carts::MockCartsService, favorites::MockFavoritesService, orders::MockOrdersService,
        products::MockCatalogService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_RETAILER: Identity = Identity {
    user: TEST_USER_UUID,
    role: Role::Retailer,
};

pub(crate) const TEST_ADMIN: Identity = Identity {
    user: TEST_USER_UUID,
    role: Role::Admin,
};

#[salvo::handler]
async fn inject_retailer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(TEST_RETAILER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_admin(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_identity(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_items().never();
    carts.expect_update_item_quantity().never();
    carts.expect_update_item_quantities().never();
    carts.expect_remove_item().never();
    carts.expect_remove_product().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_products().never();
    catalog.expect_get_product().never();

    catalog
}

fn strict_favorites_mock() -> MockFavoritesService {
    let mut favorites = MockFavoritesService::new();

    favorites.expect_add_favorite().never();
    favorites.expect_remove_favorite().never();
    favorites.expect_list_favorites().never();

    favorites
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_update_order_status().never();

    orders
}

fn state(
    auth: MockAuthService,
    carts: MockCartsService,
    catalog: MockCatalogService,
    orders: MockOrdersService,
) -> Arc<State> {
    state_with_favorites(auth, carts, catalog, orders, strict_favorites_mock())
}

fn state_with_favorites(
    auth: MockAuthService,
    carts: MockCartsService,
    catalog: MockCatalogService,
    orders: MockOrdersService,
    favorites: MockFavoritesService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        carts: Arc::new(carts),
        catalog: Arc::new(catalog),
        favorites: Arc::new(favorites),
        orders: Arc::new(orders),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(auth, strict_carts_mock(), strict_catalog_mock(), strict_orders_mock())
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                strict_auth_mock(),
                carts,
                strict_catalog_mock(),
                strict_orders_mock(),
            )))
            .hoop(inject_retailer)
            .push(route),
    )
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                strict_auth_mock(),
                strict_carts_mock(),
                catalog,
                strict_orders_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn favorites_service(favorites: MockFavoritesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_favorites(
                strict_auth_mock(),
                strict_carts_mock(),
                strict_catalog_mock(),
                strict_orders_mock(),
                favorites,
            )))
            .hoop(inject_retailer)
            .push(route),
    )
}

fn orders_state(orders: MockOrdersService) -> Arc<State> {
    state(strict_auth_mock(), strict_carts_mock(), strict_catalog_mock(), orders)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(orders_state(orders)))
            .hoop(inject_retailer)
            .push(route),
    )
}

pub(crate) fn admin_orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(orders_state(orders)))
            .hoop(inject_admin)
            .push(route),
    )
}
