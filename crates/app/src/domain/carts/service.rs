//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use showroom::cart::{CartLine, CartSummary};
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        carts::{
            data::{CartItemQuantity, CartItemUpdateError, CartItemsUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartLineRecord, UnresolvedLine},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::records::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let lines = resolve_lines(self.items_repository.get_cart_lines(tx, user).await?)?;

        Ok(CartSummary::from_lines(&lines))
    }

    /// Load a line owned by `user`, locking it.
    async fn owned_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let record = self
            .items_repository
            .find_cart_item(tx, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if record.owner != user {
            return Err(CartsServiceError::Forbidden);
        }

        Ok(record)
    }

    /// Set a line's quantity, removing it at zero.
    async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        if quantity == 0 {
            self.items_repository.delete_cart_item(tx, item).await?;
        } else {
            self.items_repository
                .update_quantity(tx, item, stored_quantity(quantity)?)
                .await?;
        }

        Ok(())
    }
}

/// Convert stored lines into resolved cart lines, failing on the first that does not resolve.
pub(crate) fn resolve_lines(
    records: Vec<CartLineRecord>,
) -> Result<Vec<CartLine>, UnresolvedLine> {
    records.into_iter().map(CartLine::try_from).collect()
}

fn stored_quantity(quantity: u32) -> Result<i32, CartsServiceError> {
    i32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or(CartsServiceError::InvalidQuantity)
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let summary = self.summary(&mut tx, user).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.upsert_cart(&mut tx, user).await?;

        for item in &items {
            let quantity = stored_quantity(item.quantity)?;

            self.items_repository
                .upsert_cart_item(&mut tx, cart.uuid, item, quantity)
                .await?;
        }

        let summary = self.summary(&mut tx, user).await?;

        tx.commit().await?;

        debug!(cart = %cart.uuid, added = items.len(), "added items to cart");

        Ok(summary)
    }

    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_cart(&mut tx, user).await?;
        self.owned_item(&mut tx, user, item).await?;
        self.set_quantity(&mut tx, item, quantity).await?;

        let summary = self.summary(&mut tx, user).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn update_item_quantities(
        &self,
        user: UserUuid,
        updates: Vec<CartItemQuantity>,
    ) -> Result<CartItemsUpdate, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_cart(&mut tx, user).await?;

        let mut outcome = CartItemsUpdate::default();

        for update in updates {
            let applied = match self.owned_item(&mut tx, user, update.item).await {
                Ok(_) => self.set_quantity(&mut tx, update.item, update.quantity).await,
                Err(error) => Err(error),
            };

            match applied {
                Ok(()) => outcome.updated.push(update.item),
                Err(
                    error @ (CartsServiceError::NotFound
                    | CartsServiceError::Forbidden
                    | CartsServiceError::InvalidQuantity),
                ) => outcome.errors.push(CartItemUpdateError {
                    item: update.item,
                    message: item_error_message(&error).to_string(),
                }),
                Err(error) => return Err(error),
            }
        }

        tx.commit().await?;

        Ok(outcome)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_cart(&mut tx, user).await?;
        self.owned_item(&mut tx, user, item).await?;
        self.items_repository.delete_cart_item(&mut tx, item).await?;

        let summary = self.summary(&mut tx, user).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn remove_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_cart(&mut tx, user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_product(&mut tx, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let summary = self.summary(&mut tx, user).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.lock_cart(&mut tx, user).await?;
        self.carts_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Foreign lines are reported as missing so their existence is not revealed.
fn item_error_message(error: &CartsServiceError) -> &'static str {
    match error {
        CartsServiceError::InvalidQuantity => "invalid quantity",
        _ => "cart item not found",
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The caller's cart, grouped by designer. A user without a cart gets an empty summary.
    async fn get_cart(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError>;

    /// Add lines to the caller's cart, merging lines with the same product, color and size.
    async fn add_items(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Set one line's quantity. Zero removes the line.
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Set several lines' quantities, reporting lines that could not be updated.
    async fn update_item_quantities(
        &self,
        user: UserUuid,
        updates: Vec<CartItemQuantity>,
    ) -> Result<CartItemsUpdate, CartsServiceError>;

    /// Remove one line.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Remove every line of a product.
    async fn remove_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Remove every line from the caller's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
