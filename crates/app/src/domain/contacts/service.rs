//! Contacts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::contacts::{
        data::NewContact,
        errors::ContactsServiceError,
        records::{ContactRecord, ContactStatus, ContactUuid},
        repository::PgContactsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgContactsService {
    db: Db,
    repository: PgContactsRepository,
}

impl PgContactsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgContactsRepository::new(),
        }
    }
}

#[async_trait]
impl ContactsService for PgContactsService {
    async fn create_contact(
        &self,
        contact: NewContact,
    ) -> Result<ContactRecord, ContactsServiceError> {
        if !contact.is_complete() {
            return Err(ContactsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_contact(&mut tx, &contact).await?;

        tx.commit().await?;

        info!(contact = %created.uuid, "contact enquiry received");

        Ok(created)
    }

    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRecord>, ContactsServiceError> {
        let mut tx = self.db.begin().await?;

        let contacts = self.repository.list_contacts(&mut tx, status).await?;

        tx.commit().await?;

        Ok(contacts)
    }

    async fn set_status(
        &self,
        contact: ContactUuid,
        status: ContactStatus,
    ) -> Result<ContactRecord, ContactsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_status(&mut tx, contact, status).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_contact(&self, contact: ContactUuid) -> Result<(), ContactsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_contact(&mut tx, contact).await?;

        if rows_affected == 0 {
            return Err(ContactsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ContactsService: Send + Sync {
    /// Store an enquiry from the public contact form.
    async fn create_contact(
        &self,
        contact: NewContact,
    ) -> Result<ContactRecord, ContactsServiceError>;

    /// Enquiries, newest first, optionally with one status.
    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRecord>, ContactsServiceError>;

    async fn set_status(
        &self,
        contact: ContactUuid,
        status: ContactStatus,
    ) -> Result<ContactRecord, ContactsServiceError>;

    async fn delete_contact(&self, contact: ContactUuid) -> Result<(), ContactsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_contact};

    use super::*;

    #[tokio::test]
    async fn create_contact_starts_as_new() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.contacts.create_contact(new_contact("Fr. Dowling")).await?;

        assert_eq!(created.status, ContactStatus::New);
        assert_eq!(created.name, "Fr. Dowling");

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_contact_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .contacts
            .create_contact(NewContact {
                message: String::new(),
                ..new_contact("Fr. Dowling")
            })
            .await;

        assert!(matches!(result, Err(ContactsServiceError::MissingRequiredData)));

        Ok(())
    }

    #[tokio::test]
    async fn list_contacts_filters_by_status() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.contacts.create_contact(new_contact("Abbot Paul")).await?;
        ctx.contacts.create_contact(new_contact("Deacon Ruth")).await?;

        ctx.contacts
            .set_status(first.uuid, ContactStatus::Resolved)
            .await?;

        let all = ctx.contacts.list_contacts(None).await?;
        let fresh = ctx.contacts.list_contacts(Some(ContactStatus::New)).await?;
        let resolved = ctx
            .contacts
            .list_contacts(Some(ContactStatus::Resolved))
            .await?;

        assert_eq!(all.len(), 2);
        assert_eq!(fresh.len(), 1);
        assert_eq!(resolved.first().map(|contact| contact.uuid), Some(first.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn set_status_on_unknown_contact_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .contacts
            .set_status(ContactUuid::new(), ContactStatus::Read)
            .await;

        assert!(matches!(result, Err(ContactsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_contact_removes_it_once() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.contacts.create_contact(new_contact("Canon Hale")).await?;

        ctx.contacts.delete_contact(created.uuid).await?;

        let again = ctx.contacts.delete_contact(created.uuid).await;

        assert!(matches!(again, Err(ContactsServiceError::NotFound)));
        assert!(ctx.contacts.list_contacts(None).await?.is_empty());

        Ok(())
    }
}
