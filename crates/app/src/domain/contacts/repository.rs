//! Contacts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::contacts::{
    data::NewContact,
    records::{ContactRecord, ContactStatus, ContactUuid},
};

const CREATE_CONTACT_SQL: &str = include_str!("sql/create_contact.sql");
const LIST_CONTACTS_SQL: &str = include_str!("sql/list_contacts.sql");
const SET_CONTACT_STATUS_SQL: &str = include_str!("sql/set_contact_status.sql");
const DELETE_CONTACT_SQL: &str = include_str!("sql/delete_contact.sql");
const COUNT_CONTACTS_SQL: &str = include_str!("sql/count_contacts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContactsRepository;

impl PgContactsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: &NewContact,
    ) -> Result<ContactRecord, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(CREATE_CONTACT_SQL)
            .bind(contact.uuid.into_uuid())
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(contact.phone.as_deref())
            .bind(&contact.subject)
            .bind(&contact.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_contacts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactRecord>, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(LIST_CONTACTS_SQL)
            .bind(status.map(ContactStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: ContactUuid,
        status: ContactStatus,
    ) -> Result<ContactRecord, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(SET_CONTACT_STATUS_SQL)
            .bind(contact.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: ContactUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CONTACT_SQL)
            .bind(contact.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_contacts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: ContactStatus,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_CONTACTS_SQL)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ContactRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: ContactUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
