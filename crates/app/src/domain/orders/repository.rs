//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use showroom::cart::CartLine;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    domain::orders::{
        data::NewOrder,
        records::{OrderDetailRecord, OrderDetailUuid, OrderRecord, OrderStatus, OrderUuid},
    },
    notifications::Contact,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_DETAIL_SQL: &str = include_str!("sql/create_order_detail.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const GET_ORDER_DETAILS_SQL: &str = include_str!("sql/get_order_details.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const GET_BUYER_CONTACT_SQL: &str = include_str!("sql/get_buyer_contact.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "orders.repository.create_order",
        skip_all,
        fields(order_uuid = %uuid, user_uuid = %user, serial_number = %serial_number),
        err
    )]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        user: UserUuid,
        serial_number: &str,
        total_amount: Decimal,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(serial_number)
            .bind(total_amount)
            .bind(order.address_uuid)
            .bind(order.payment_intent_id.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Snapshot a cart line as an order detail.
    pub(crate) async fn create_order_detail(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &CartLine,
    ) -> Result<OrderDetailRecord, sqlx::Error> {
        let quantity =
            i32::try_from(line.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, OrderDetailRecord>(CREATE_ORDER_DETAIL_SQL)
            .bind(OrderDetailUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(&line.product.designer.name)
            .bind(&line.product.name)
            .bind(&line.size)
            .bind(&line.color)
            .bind(quantity)
            .bind(line.product.wholesale_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let Some(order) = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let mut orders = self.with_details(tx, vec![order]).await?;

        Ok(orders.pop())
    }

    /// Find an order and lock it for the rest of the transaction. Details are not loaded.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "orders.repository.list_user_orders",
        skip(self, tx),
        fields(user_uuid = %user),
        err
    )]
    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.with_details(tx, orders).await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = self.with_details(tx, vec![order]).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn get_buyer_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Contact, sqlx::Error> {
        let (email, name): (String, String) = query_as(GET_BUYER_CONTACT_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(Contact { email, name })
    }

    /// Attach each order's details, keeping the orders in the given order.
    async fn with_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let details = query_as::<Postgres, OrderDetailRecord>(GET_ORDER_DETAILS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderDetailRecord>> = FxHashMap::default();

        for detail in details {
            by_order.entry(detail.order_uuid).or_default().push(detail);
        }

        for order in &mut orders {
            order.details = by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let payment_status: String = row.try_get("payment_status")?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            user: row.try_get::<Uuid, _>("user_uuid")?.into(),
            serial_number: row.try_get("serial_number")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            payment_status: payment_status
                .parse()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_status".to_string(),
                    source: Box::new(e),
                })?,
            total_amount: row.try_get("total_amount")?,
            address_uuid: row.try_get("address_uuid")?,
            payment_intent_id: row.try_get("payment_intent_id")?,
            order_date: row.try_get::<SqlxTimestamp, _>("order_date")?.to_jiff(),
            details: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderDetailRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            order_uuid: row.try_get::<Uuid, _>("order_uuid")?.into(),
            designer: row.try_get("designer")?,
            product_name: row.try_get("product_name")?,
            size: row.try_get("size")?,
            color: row.try_get("color")?,
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            price: row.try_get("price")?,
        })
    }
}
