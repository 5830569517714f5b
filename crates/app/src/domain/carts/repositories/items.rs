//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, CartLineRecord, CartUuid},
        },
        products::records::ProductUuid,
    },
};

use super::carts::try_get_quantity;

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const FIND_CART_ITEM_SQL: &str = include_str!("../sql/find_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const DELETE_CART_PRODUCT_SQL: &str = include_str!("../sql/delete_cart_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The user's cart lines in creation order, joined to product and designer.
    #[tracing::instrument(
        name = "carts.repository.get_cart_lines",
        skip(self, tx),
        fields(user_uuid = %user),
        err
    )]
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line, or add to the quantity of the line with the same product, color and size.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &NewCartItem,
        quantity: i32,
    ) -> Result<CartItemUuid, sqlx::Error> {
        let uuid: Uuid = query_scalar(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.color)
            .bind(&item.size)
            .bind(quantity)
            .fetch_one(&mut **tx)
            .await?;

        Ok(uuid.into())
    }

    /// Find a line and lock it for the rest of the transaction.
    pub(crate) async fn find_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(FIND_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_PRODUCT_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            cart_uuid: row.try_get::<Uuid, _>("cart_uuid")?.into(),
            owner: row.try_get::<Uuid, _>("user_uuid")?.into(),
            product_uuid: row.try_get::<Uuid, _>("product_uuid")?.into(),
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            quantity: try_get_quantity(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let minimum_order_quantity = row
            .try_get::<Option<i32>, _>("minimum_order_quantity")?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "minimum_order_quantity".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            product_uuid: row.try_get::<Uuid, _>("product_uuid")?.into(),
            product_name: row.try_get("product_name")?,
            product_slug: row.try_get("product_slug")?,
            wholesale_price: row.try_get("wholesale_price")?,
            designer_name: row.try_get("designer_name")?,
            designer_slug: row.try_get("designer_slug")?,
            designer_cover_image: row.try_get("designer_cover_image")?,
            minimum_order_quantity,
            minimum_order_value: row.try_get("minimum_value")?,
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}
