//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{Identity, NewUser, Role, UserUuid};

const FIND_IDENTITY_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_identity_by_token_hash.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "auth.repository.find_identity", skip_all, err)]
    pub(crate) async fn find_identity_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<Identity>, sqlx::Error> {
        query_as::<Postgres, Identity>(FIND_IDENTITY_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token(&self, hash: &str) -> Result<u64, sqlx::Error> {
        let rows_affected = query(TOUCH_API_TOKEN_SQL)
            .bind(hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "auth.repository.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid),
        err
    )]
    pub(crate) async fn create_user(&self, user: &NewUser) -> Result<(), sqlx::Error> {
        query(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_api_token(
        &self,
        user: UserUuid,
        token_hash: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(Uuid::now_v7())
            .bind(user.into_uuid())
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Identity {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            user: row.try_get::<Uuid, _>("uuid")?.into(),
            role: role
                .parse::<Role>()
                .map_err(|error| sqlx::Error::ColumnDecode {
                    index: "role".to_string(),
                    source: Box::new(error),
                })?,
        })
    }
}
