//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;

use crate::auth::{
    AuthServiceError, Identity, IssuedApiToken, NewUser, UserUuid, generate_api_token,
    hash_api_token, repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Create a user account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::AlreadyExists`] when the email is taken.
    pub async fn create_user(&self, user: NewUser) -> Result<UserUuid, AuthServiceError> {
        self.repository.create_user(&user).await?;

        Ok(user.uuid)
    }

    /// Issue a new bearer token for a user. Only the hash is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let token = generate_api_token();

        self.repository
            .create_api_token(user, &hash_api_token(&token))
            .await?;

        Ok(IssuedApiToken { token, user })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let hash = hash_api_token(bearer_token);

        let identity = self
            .repository
            .find_identity_by_token_hash(&hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.repository.touch_api_token(&hash).await {
            warn!("failed to record api token use: {error}");
        }

        Ok(identity)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;
}
