//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{AuthServiceError, IdentityVerifier},
    domain::users::{
        UsersService,
        records::{UserRecord, UserRole, UserUuid},
    },
};

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: UserUuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<UserRecord> for Principal {
    fn from(user: UserRecord) -> Self {
        Self {
            user_uuid: user.uuid,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

#[derive(Clone)]
pub struct PgAuthService {
    users: Arc<dyn UsersService>,
    verifier: Arc<dyn IdentityVerifier>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UsersService>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { users, verifier }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let token = bearer_token.trim();

        if token.is_empty() {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let identity = self.verifier.verify(token).await?;

        let user = self.users.sync_identity(identity).await?;

        debug!(user = %user.uuid, role = %user.role, "bearer token authenticated");

        Ok(user.into())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify a bearer token and return the local user it belongs to,
    /// creating the user on first sight.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::{
        auth::{IdentityError, MockIdentityVerifier},
        domain::users::{MockUsersService, PgUsersService, UsersServiceError},
        test::{TestContext, helpers::identity},
    };

    use super::*;

    fn service(ctx: &TestContext, verifier: MockIdentityVerifier) -> PgAuthService {
        PgAuthService::new(Arc::new(PgUsersService::new(ctx.db())), Arc::new(verifier))
    }

    #[tokio::test]
    async fn valid_token_creates_and_returns_the_user() -> TestResult {
        let ctx = TestContext::new().await;
        let mut verifier = MockIdentityVerifier::new();

        verifier
            .expect_verify()
            .with(eq("good-token"))
            .times(2)
            .returning(|_| Ok(identity("uid-7", "seven@example.com")));

        let auth = service(&ctx, verifier);

        let first = auth.authenticate_bearer("good-token").await?;
        let second = auth.authenticate_bearer(" good-token ").await?;

        assert_eq!(first, second);
        assert_eq!(first.email, "seven@example.com");
        assert!(!first.is_admin());

        Ok(())
    }

    #[tokio::test]
    async fn rejected_token_is_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;
        let mut verifier = MockIdentityVerifier::new();

        verifier
            .expect_verify()
            .returning(|_| Err(IdentityError::Rejected(StatusCode::UNAUTHORIZED)));

        let result = service(&ctx, verifier).authenticate_bearer("bad").await;

        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));

        Ok(())
    }

    #[tokio::test]
    async fn verified_identity_is_synced_through_the_users_service() -> TestResult {
        let mut verifier = MockIdentityVerifier::new();
        let mut users = MockUsersService::new();

        verifier
            .expect_verify()
            .once()
            .returning(|_| Ok(identity("uid-9", "nine@example.com")));

        users
            .expect_sync_identity()
            .once()
            .withf(|identity| identity.external_id == "uid-9")
            .return_once(|_| Err(UsersServiceError::InvalidData));

        let auth = PgAuthService::new(Arc::new(users), Arc::new(verifier));

        let result = auth.authenticate_bearer("good-token").await;

        assert!(matches!(
            result,
            Err(AuthServiceError::Users(UsersServiceError::InvalidData))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn blank_token_never_reaches_the_provider() -> TestResult {
        let ctx = TestContext::new().await;
        let mut verifier = MockIdentityVerifier::new();

        verifier.expect_verify().never();

        let result = service(&ctx, verifier).authenticate_bearer("   ").await;

        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));

        Ok(())
    }
}
