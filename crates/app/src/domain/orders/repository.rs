//! Orders Repository

use std::str::FromStr;

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;
use vestry::{
    orders::{OrderStatus, PaymentStatus, UnknownStatus},
    pricing::PriceBreakdown,
};

use crate::domain::{
    available_dates::records::SlotAllocation,
    orders::records::{CheckoutUuid, CustomerSnapshot, OrderRecord, OrderUuid, ProductSnapshot},
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_USER_ORDER_SQL: &str = include_str!("sql/get_user_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LOCK_ORDERS_SQL: &str = include_str!("sql/lock_orders.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const LIST_OVERDUE_ORDERS_SQL: &str = include_str!("sql/list_overdue_orders.sql");
const LIST_UPCOMING_ORDERS_SQL: &str = include_str!("sql/list_upcoming_orders.sql");

/// Row to insert for a new order.
#[derive(Debug)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub order_number: &'a str,
    pub user_uuid: UserUuid,
    pub checkout_uuid: CheckoutUuid,
    pub customer: &'a CustomerSnapshot,
    pub product: &'a ProductSnapshot,
    pub allocations: &'a [SlotAllocation],
    pub price: &'a PriceBreakdown,
}

impl OrderInsert<'_> {
    fn earliest_delivery_date(&self) -> Option<Date> {
        self.allocations
            .iter()
            .map(|allocation| allocation.date)
            .min()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderInsert<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.order_number)
            .bind(order.user_uuid.into_uuid())
            .bind(order.checkout_uuid.into_uuid())
            .bind(&order.customer.name)
            .bind(&order.customer.email)
            .bind(order.customer.phone.as_deref())
            .bind(Json(order.product))
            .bind(Json(order.allocations))
            .bind(Json(order.price))
            .bind(order.price.total)
            .bind(order.earliest_delivery_date().map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_USER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock every listed order that exists, in id order.
    pub(crate) async fn lock_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderRecord>(LOCK_ORDERS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(payment_status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Pending orders placed before `placed_before`.
    pub(crate) async fn list_overdue_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        placed_before: Timestamp,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_OVERDUE_ORDERS_SQL)
            .bind(SqlxTimestamp::from(placed_before))
            .fetch_all(&mut **tx)
            .await
    }

    /// Open orders whose first delivery date falls within `from..=until`.
    pub(crate) async fn list_upcoming_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from: Date,
        until: Date,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_UPCOMING_ORDERS_SQL)
            .bind(SqlxDate::from(from))
            .bind(SqlxDate::from(until))
            .fetch_all(&mut **tx)
            .await
    }
}

fn try_get_status<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = UnknownStatus>,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            checkout_uuid: CheckoutUuid::from_uuid(row.try_get("checkout_uuid")?),
            customer: CustomerSnapshot {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            product: row.try_get::<Json<ProductSnapshot>, _>("product")?.0,
            allocations: row
                .try_get::<Json<Vec<SlotAllocation>>, _>("allocations")?
                .0,
            price: row.try_get::<Json<PriceBreakdown>, _>("price")?.0,
            earliest_delivery_date: row
                .try_get::<Option<SqlxDate>, _>("earliest_delivery_date")?
                .map(|date| date.to_jiff()),
            status: try_get_status(row, "status")?,
            payment_status: try_get_status(row, "payment_status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
