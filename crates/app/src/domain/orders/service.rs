//! Orders service.

use std::collections::HashSet;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::info;
use vestry::{
    calendar::today_utc,
    orders::{OrderStatus, SlotEffect, order_number, slot_effect},
    pricing::{AllocationCharge, PricingError, order_price, round_money},
};

use crate::{
    database::Db,
    domain::{
        available_dates::{
            data::SlotRequest,
            ledger::{Availability, PgSlotReservations},
            records::SlotAllocation,
        },
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            data::{CustomerDetails, NewOrder, PaymentReport},
            errors::OrdersServiceError,
            records::{
                Checkout, CheckoutUuid, CustomerSnapshot, OrderRecord, OrderUuid, ProductSnapshot,
            },
            repository::{OrderInsert, PgOrdersRepository},
        },
        products::{
            data::QuoteRequest,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
            service::quote,
        },
        users::{
            records::{UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

/// One line to turn into an order, from a direct purchase or a cart item.
struct OrderLine<'a> {
    uuid: OrderUuid,
    product_uuid: ProductUuid,
    material: Option<&'a str>,
    cloth_provided: bool,
    quantity: u32,
    allocations: &'a [SlotRequest],
    measurements: Option<&'a str>,
    notes: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    reservations: PgSlotReservations,
    products_repository: PgProductsRepository,
    users_repository: PgUsersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            reservations: PgSlotReservations::new(),
            products_repository: PgProductsRepository::new(),
            users_repository: PgUsersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, OrdersServiceError> {
        match self.users_repository.get_user(tx, user).await {
            Ok(record) => Ok(record),
            Err(sqlx::Error::RowNotFound) => Err(OrdersServiceError::UserNotFound),
            Err(error) => Err(error.into()),
        }
    }

    async fn orderable_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: &OrderLine<'_>,
    ) -> Result<ProductRecord, OrdersServiceError> {
        let product = match self
            .products_repository
            .get_product(tx, line.product_uuid)
            .await
        {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::ProductNotFound),
            Err(error) => return Err(error.into()),
        };

        if !product.is_orderable() {
            return Err(OrdersServiceError::ProductNotFound);
        }

        Ok(product)
    }

    /// Reserve the line's slots, price it and write the order.
    async fn place(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        checkout_uuid: CheckoutUuid,
        customer: &CustomerSnapshot,
        line: OrderLine<'_>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if line.quantity == 0 {
            return Err(PricingError::ZeroQuantity.into());
        }

        let product = self.orderable_product(tx, &line).await?;

        let unit = quote(
            &product,
            &QuoteRequest {
                material: line.material.map(str::to_string),
                cloth_provided: line.cloth_provided,
            },
        )?;

        let allocations = self
            .reservations
            .reserve(tx, line.allocations, Availability::Required)
            .await?;

        let charges: Vec<AllocationCharge> = allocations
            .iter()
            .map(|allocation| AllocationCharge {
                emergency_slot_cost: allocation.emergency_slot_cost,
                normal_slots_used: allocation.normal_slots_used,
                emergency_slots_used: allocation.emergency_slots_used,
            })
            .collect();

        let price = order_price(unit.amount, line.quantity, &charges)?;

        let number = order_number(today_utc(), rand::random::<u32>());

        let snapshot = ProductSnapshot {
            product_uuid: product.uuid.into_uuid(),
            name: product.name,
            denomination: product.denomination,
            material: line.material.map(str::to_string),
            cloth_provided: line.cloth_provided,
            quantity: line.quantity,
            measurements: line.measurements.map(str::to_string),
            notes: line.notes.map(str::to_string),
        };

        let order = self
            .repository
            .create_order(
                tx,
                &OrderInsert {
                    uuid: line.uuid,
                    order_number: &number,
                    user_uuid: user,
                    checkout_uuid,
                    customer,
                    product: &snapshot,
                    allocations: &allocations,
                    price: &price,
                },
            )
            .await?;

        info!(
            order = %order.uuid,
            order_number = %order.order_number,
            total = %order.price.total,
            "order placed"
        );

        Ok(order)
    }

    async fn apply_slot_effect(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
        effect: SlotEffect,
    ) -> Result<(), OrdersServiceError> {
        match effect {
            SlotEffect::Keep => {}
            SlotEffect::Release => {
                self.reservations.release(tx, &order.allocations).await?;
            }
            SlotEffect::Reserve => {
                let requests: Vec<SlotRequest> = order
                    .allocations
                    .iter()
                    .map(SlotAllocation::request)
                    .collect();

                self.reservations
                    .reserve(tx, &requests, Availability::Ignored)
                    .await?;
            }
        }

        Ok(())
    }
}

fn checkout(
    checkout_uuid: CheckoutUuid,
    orders: Vec<OrderRecord>,
) -> Result<Checkout, OrdersServiceError> {
    let mut total = Decimal::ZERO;
    let mut total_minor_units: i64 = 0;

    for order in &orders {
        total = total
            .checked_add(order.price.total)
            .ok_or(PricingError::Overflow)?;

        total_minor_units = total_minor_units
            .checked_add(order.price.total_minor_units()?)
            .ok_or(PricingError::Overflow)?;
    }

    Ok(Checkout {
        checkout_uuid,
        orders,
        total: round_money(total),
        total_minor_units,
    })
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Checkout, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.user(&mut tx, user).await?;
        let customer = order.customer.resolve(&record);
        let checkout_uuid = CheckoutUuid::new();

        let placed = self
            .place(
                &mut tx,
                user,
                checkout_uuid,
                &customer,
                OrderLine {
                    uuid: order.uuid,
                    product_uuid: order.product_uuid,
                    material: order.material.as_deref(),
                    cloth_provided: order.cloth_provided,
                    quantity: order.quantity,
                    allocations: &order.allocations,
                    measurements: order.measurements.as_deref(),
                    notes: order.notes.as_deref(),
                },
            )
            .await?;

        tx.commit().await?;

        checkout(checkout_uuid, vec![placed])
    }

    async fn checkout_cart(
        &self,
        user: UserUuid,
        customer: CustomerDetails,
    ) -> Result<Checkout, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.user(&mut tx, user).await?;
        let customer = customer.resolve(&record);

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;
        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        self.reservations
            .lock_dates(
                &mut tx,
                items
                    .iter()
                    .flat_map(|item| &item.allocations)
                    .map(SlotRequest::available_date),
            )
            .await?;

        let checkout_uuid = CheckoutUuid::new();
        let mut orders = Vec::with_capacity(items.len());

        for item in &items {
            let placed = self
                .place(
                    &mut tx,
                    user,
                    checkout_uuid,
                    &customer,
                    OrderLine {
                        uuid: OrderUuid::new(),
                        product_uuid: item.product_uuid,
                        material: item.material.as_deref(),
                        cloth_provided: item.cloth_provided,
                        quantity: item.quantity,
                        allocations: &item.allocations,
                        measurements: item.measurements.as_deref(),
                        notes: item.notes.as_deref(),
                    },
                )
                .await?;

            orders.push(placed);
        }

        self.items_repository.clear_cart_items(&mut tx, cart.uuid).await?;
        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(checkout = %checkout_uuid, orders = orders.len(), "cart checked out");

        checkout(checkout_uuid, orders)
    }

    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_user_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_user_order(&mut tx, user, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, status).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        self.apply_slot_effect(&mut tx, &current, slot_effect(current.status, status))
            .await?;

        let updated = self
            .repository
            .update_status(&mut tx, order, status, current.payment_status)
            .await?;

        tx.commit().await?;

        info!(
            order = %order,
            from = %current.status,
            to = %status,
            "order status updated"
        );

        Ok(updated)
    }

    async fn apply_payment_outcome(
        &self,
        report: PaymentReport,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let requested: HashSet<OrderUuid> = report.orders.iter().copied().collect();

        if requested.is_empty() {
            return Err(OrdersServiceError::NoOrders);
        }

        let mut ordered: Vec<OrderUuid> = requested.into_iter().collect();
        ordered.sort();

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_orders(&mut tx, &ordered).await?;

        if current.len() != ordered.len() {
            return Err(OrdersServiceError::NotFound);
        }

        self.reservations
            .lock_dates(
                &mut tx,
                current
                    .iter()
                    .flat_map(|order| &order.allocations)
                    .map(SlotAllocation::available_date),
            )
            .await?;

        let mut results = Vec::with_capacity(current.len());

        for order in current {
            let transition = report.outcome.apply(order.status);

            if transition.is_noop(order.status, order.payment_status) {
                results.push(order);
                continue;
            }

            self.apply_slot_effect(&mut tx, &order, transition.slots)
                .await?;

            let updated = self
                .repository
                .update_status(
                    &mut tx,
                    order.uuid,
                    transition.status,
                    transition.payment_status,
                )
                .await?;

            results.push(updated);
        }

        tx.commit().await?;

        info!(
            outcome = ?report.outcome,
            orders = results.len(),
            "payment outcome applied"
        );

        Ok(results)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Book the requested slots and place a single order.
    ///
    /// Validation, reservation and the order insert share one transaction,
    /// so a failed booking leaves the ledger untouched.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Checkout, OrdersServiceError>;

    /// Place one order per cart item under a shared checkout id and empty
    /// the cart.
    async fn checkout_cart(
        &self,
        user: UserUuid,
        customer: CustomerDetails,
    ) -> Result<Checkout, OrdersServiceError>;

    /// Orders placed by `user`, newest first.
    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One of the user's orders.
    async fn get_user_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Any order by id.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// All orders, optionally with one status, newest first.
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to `status`, releasing or re-reserving its slots when
    /// it enters or leaves `cancelled`.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Record the result of a payment attempt for every listed order.
    async fn apply_payment_outcome(
        &self,
        report: PaymentReport,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
