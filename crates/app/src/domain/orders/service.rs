//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use showroom::cart::{CartLine, CartSummary};
use tracing::{info, warn};

use crate::{
    auth::{Identity, UserUuid},
    database::Db,
    domain::{
        carts::{
            repositories::{PgCartItemsRepository, PgCartsRepository},
            service::resolve_lines,
        },
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
            serial::generate_serial_number,
        },
    },
    notifications::{Contact, NoticeLine, Notifier, OrderNotice},
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            notifier,
        }
    }

    /// Send the placed-order notice in the background. Failures are logged only.
    fn notify(&self, notice: OrderNotice) {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(error) = notifier.order_placed(&notice).await {
                warn!(
                    serial_number = %notice.serial_number,
                    "failed to send order notification: {error}"
                );
            }
        });
    }
}

fn notice(order: &OrderRecord, buyer: Contact, lines: &[CartLine]) -> OrderNotice {
    OrderNotice {
        serial_number: order.serial_number.clone(),
        buyer,
        lines: lines
            .iter()
            .map(|line| NoticeLine {
                designer: line.product.designer.name.clone(),
                product: line.product.name.clone(),
                color: line.color.clone(),
                size: line.size.clone(),
                quantity: line.quantity,
                price: line.product.wholesale_price,
            })
            .collect(),
        total_amount: order.total_amount,
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        buyer: Identity,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        // Cart mutations take the same lock, so the lines read here are the lines cleared below.
        if self
            .carts_repository
            .lock_cart(&mut tx, buyer.user)
            .await?
            .is_none()
        {
            return Err(OrdersServiceError::EmptyCart);
        }

        let lines = resolve_lines(
            self.items_repository
                .get_cart_lines(&mut tx, buyer.user)
                .await?,
        )?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let summary = CartSummary::from_lines(&lines);
        let serial_number = generate_serial_number();

        let mut record = self
            .orders_repository
            .create_order(
                &mut tx,
                OrderUuid::new(),
                buyer.user,
                &serial_number,
                summary.total_service_amount,
                &order,
            )
            .await?;

        for line in &lines {
            let detail = self
                .orders_repository
                .create_order_detail(&mut tx, record.uuid, line)
                .await?;

            record.details.push(detail);
        }

        self.carts_repository.clear_cart(&mut tx, buyer.user).await?;

        let contact = self
            .orders_repository
            .get_buyer_contact(&mut tx, buyer.user)
            .await?;

        tx.commit().await?;

        info!(
            order_uuid = %record.uuid,
            serial_number = %record.serial_number,
            total_amount = %record.total_amount,
            "order placed"
        );

        self.notify(notice(&record, contact, &lines));

        Ok(record)
    }

    async fn get_order(
        &self,
        caller: Identity,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .orders_repository
            .get_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        if record.user != caller.user && !caller.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(record)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        caller: Identity,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !caller.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if current.status.is_final() && current.status != status {
            return Err(OrdersServiceError::InvalidStatus {
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order, %status, "order status updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the buyer's cart into an order, clear the cart and notify buyer and admin.
    ///
    /// The total is the cart total with the service fee.
    async fn place_order(
        &self,
        buyer: Identity,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// One order with its details. Only its buyer or an admin may read it.
    async fn get_order(
        &self,
        caller: Identity,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Change an order's status. Admin only.
    async fn update_order_status(
        &self,
        caller: Identity,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
