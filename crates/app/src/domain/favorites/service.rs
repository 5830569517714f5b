//! Favorites service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::query;
use tracing::debug;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        favorites::errors::FavoritesServiceError,
        products::{
            query::favorite_products,
            records::{ProductRecord, ProductUuid},
        },
    },
};

const ADD_FAVORITE_SQL: &str = include_str!("sql/add_favorite.sql");
const REMOVE_FAVORITE_SQL: &str = include_str!("sql/remove_favorite.sql");

#[derive(Debug, Clone)]
pub struct PgFavoritesService {
    db: Db,
}

impl PgFavoritesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoritesService for PgFavoritesService {
    #[tracing::instrument(
        name = "favorites.service.add_favorite",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn add_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(ADD_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!(added = rows_affected > 0, "favorite saved");

        Ok(())
    }

    #[tracing::instrument(
        name = "favorites.service.remove_favorite",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn remove_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(REMOVE_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(FavoritesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_favorites(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, FavoritesServiceError> {
        let products = favorite_products(user.into_uuid())
            .build_query_as::<ProductRecord>()
            .fetch_all(self.db.pool())
            .await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Mark a product as a favorite of `user`. Adding an existing favorite succeeds.
    async fn add_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), FavoritesServiceError>;

    /// Drop a favorite, failing with `NotFound` when it was not set.
    async fn remove_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), FavoritesServiceError>;

    /// The user's favorite products, most recently added first.
    async fn list_favorites(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, FavoritesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::Role,
        test::{
            TestContext,
            helpers::{ProductSeed, create_user, seed_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn favorites_list_newest_first_and_ignore_repeats() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "fan@example.com", Role::Retailer).await?;
        let coat = seed_product(&ctx, &ProductSeed::new("Atelier", "Wool Coat", "100.00")).await?;
        let boots = seed_product(&ctx, &ProductSeed::new("Cobbler", "Boots", "80.00")).await?;

        ctx.favorites.add_favorite(user, coat).await?;
        ctx.favorites.add_favorite(user, boots).await?;
        ctx.favorites.add_favorite(user, boots).await?;

        let names: Vec<String> = ctx
            .favorites
            .list_favorites(user)
            .await?
            .into_iter()
            .map(|product| product.name)
            .collect();

        assert_eq!(names, vec!["Boots", "Wool Coat"]);

        Ok(())
    }

    #[tokio::test]
    async fn favorites_are_per_user() -> TestResult {
        let ctx = TestContext::new().await;
        let fan = create_user(&ctx, "fan@example.com", Role::Retailer).await?;
        let other = create_user(&ctx, "other@example.com", Role::Retailer).await?;
        let coat = seed_product(&ctx, &ProductSeed::new("Atelier", "Wool Coat", "100.00")).await?;

        ctx.favorites.add_favorite(fan, coat).await?;

        assert!(ctx.favorites.list_favorites(other).await?.is_empty());

        let result = ctx.favorites.remove_favorite(other, coat).await;

        assert!(
            matches!(result, Err(FavoritesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(ctx.favorites.list_favorites(fan).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn removing_a_favorite_drops_it() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "fickle@example.com", Role::Retailer).await?;
        let coat = seed_product(&ctx, &ProductSeed::new("Atelier", "Wool Coat", "100.00")).await?;

        ctx.favorites.add_favorite(user, coat).await?;
        ctx.favorites.remove_favorite(user, coat).await?;

        assert!(ctx.favorites.list_favorites(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_an_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "lost@example.com", Role::Retailer).await?;

        let result = ctx.favorites.add_favorite(user, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(FavoritesServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }
}
