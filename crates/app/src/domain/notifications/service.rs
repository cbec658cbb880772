//! Notifications service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        contacts::{records::ContactStatus, repository::PgContactsRepository},
        notifications::{
            errors::NotificationsServiceError,
            records::{NotificationSettings, NotificationsReport},
        },
        orders::repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    settings: NotificationSettings,
    orders_repository: PgOrdersRepository,
    contacts_repository: PgContactsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db, settings: NotificationSettings) -> Self {
        Self {
            db,
            settings,
            orders_repository: PgOrdersRepository::new(),
            contacts_repository: PgContactsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn report(&self, now: Timestamp) -> Result<NotificationsReport, NotificationsServiceError> {
        let cutoff = self.settings.overdue_cutoff(now)?;
        let (from, until) = self.settings.upcoming_window(now)?;

        let mut tx = self.db.begin().await?;

        let overdue_orders = self
            .orders_repository
            .list_overdue_orders(&mut tx, cutoff)
            .await?;

        let upcoming_orders = self
            .orders_repository
            .list_upcoming_orders(&mut tx, from, until)
            .await?;

        let new_contacts = self
            .contacts_repository
            .count_contacts(&mut tx, ContactStatus::New)
            .await?;

        tx.commit().await?;

        Ok(NotificationsReport {
            overdue_orders,
            upcoming_orders,
            new_contacts,
        })
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Overdue and upcoming orders plus unread enquiries as of `now`.
    async fn report(&self, now: Timestamp) -> Result<NotificationsReport, NotificationsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, ToSpan};
    use testresult::TestResult;
    use vestry::calendar::today_utc;

    use crate::{
        domain::{
            available_dates::data::SlotRequest,
            contacts::ContactsService,
            orders::{
                OrdersService,
                records::{OrderRecord, OrderUuid},
            },
        },
        test::{
            TestContext,
            helpers::{create_date, create_product, create_user, new_contact, new_order},
        },
    };

    use super::*;

    fn uuids(orders: &[OrderRecord]) -> Vec<OrderUuid> {
        orders.iter().map(|order| order.uuid).collect()
    }

    #[tokio::test]
    async fn report_is_empty_without_activity() -> TestResult {
        let ctx = TestContext::new().await;

        let report = ctx.notifications.report(Timestamp::now()).await?;

        assert!(report.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn report_flags_overdue_upcoming_and_new_contacts() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "notify").await?;
        let product = create_product(&ctx).await?;
        let today = today_utc();
        let near = create_date(&ctx, today.checked_add(2.days())?, 4, 1).await?;
        let far = create_date(&ctx, today.checked_add(60.days())?, 4, 1).await?;

        let soon = ctx
            .orders
            .create_order(
                user.uuid,
                new_order(product.uuid, vec![SlotRequest::new(near.uuid, 1, 0)]),
            )
            .await?;

        ctx.orders
            .create_order(
                user.uuid,
                new_order(product.uuid, vec![SlotRequest::new(far.uuid, 1, 0)]),
            )
            .await?;

        ctx.contacts.create_contact(new_contact("Brother Tuck")).await?;

        let now = Timestamp::now();

        let report = ctx.notifications.report(now).await?;

        assert_eq!(uuids(&report.upcoming_orders), uuids(&soon.orders));
        assert!(report.overdue_orders.is_empty());
        assert_eq!(report.new_contacts, 1);

        let later = now.checked_add(SignedDuration::from_hours(72))?;

        let overdue = ctx.notifications.report(later).await?;

        assert_eq!(overdue.overdue_orders.len(), 2);

        Ok(())
    }
}
