//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        data::{ProfileUpdate, VerifiedIdentity},
        errors::UsersServiceError,
        records::{UserRecord, UserRole, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }

    /// Grant a role to every account registered with `email`.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::NotFound`] when no account uses the
    /// address.
    pub async fn set_role_by_email(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_role_by_email(&mut tx, email, role)
            .await?;

        if updated.is_empty() {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%role, count = updated.len(), "changed user role by email");

        Ok(updated)
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn sync_identity(
        &self,
        identity: VerifiedIdentity,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.upsert_identity(&mut tx, &identity).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_profile(&mut tx, user, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_role(
        &self,
        user: UserUuid,
        role: UserRole,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_role(&mut tx, user, role).await?;

        tx.commit().await?;

        info!(user = %user, %role, "changed user role");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Find or create the user behind a verified identity, refreshing the
    /// email address it was verified with.
    async fn sync_identity(&self, identity: VerifiedIdentity)
    -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Every user, newest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Edit the user's own profile.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Change a user's role.
    async fn set_role(&self, user: UserUuid, role: UserRole)
    -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::identity};

    use super::*;

    #[tokio::test]
    async fn sync_identity_creates_customer_once() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.users.sync_identity(identity("uid-1", "a@example.com")).await?;
        let second = ctx.users.sync_identity(identity("uid-1", "b@example.com")).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(first.role, UserRole::Customer);
        assert_eq!(second.email, "b@example.com");
        assert_eq!(ctx.users.list_users().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_keeps_unset_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.sync_identity(identity("uid-1", "a@example.com")).await?;

        let named = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: Some("Fr. Andrew".to_string()),
                    phone: Some("+44 20 7946 0000".to_string()),
                },
            )
            .await?;

        let phone_only = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: None,
                    phone: Some("+44 20 7946 0001".to_string()),
                },
            )
            .await?;

        assert_eq!(named.display_name(), "Fr. Andrew");
        assert_eq!(phone_only.name.as_deref(), Some("Fr. Andrew"));
        assert_eq!(phone_only.phone.as_deref(), Some("+44 20 7946 0001"));

        Ok(())
    }

    #[tokio::test]
    async fn set_role_promotes_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.sync_identity(identity("uid-1", "a@example.com")).await?;

        let promoted = ctx.users.set_role(user.uuid, UserRole::Admin).await?;

        assert!(promoted.is_admin());

        Ok(())
    }

    #[tokio::test]
    async fn set_role_by_email_is_case_insensitive() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.sync_identity(identity("uid-1", "Rector@Example.com")).await?;

        let promoted = ctx
            .users
            .set_role_by_email("rector@example.com", UserRole::Admin)
            .await?;

        let missing = ctx
            .users
            .set_role_by_email("nobody@example.com", UserRole::Admin)
            .await;

        assert_eq!(promoted.len(), 1);
        assert!(matches!(missing, Err(UsersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(matches!(result, Err(UsersServiceError::NotFound)));

        Ok(())
    }
}
