//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use vestry::pricing::{AllocationCharge, PriceBreakdown, order_price};

use crate::{
    database::Db,
    domain::{
        available_dates::{
            AllocationError, data::SlotRequest, ledger::check_shape,
            repository::PgAvailableDatesRepository,
        },
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::{
            data::QuoteRequest, records::ProductRecord, repository::PgProductsRepository,
            service::quote,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    dates_repository: PgAvailableDatesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            dates_repository: PgAvailableDatesRepository::new(),
        }
    }

    /// Price a cart line against today's catalog and calendar.
    ///
    /// Capacity is not checked here; it is enforced at checkout.
    async fn price_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewCartItem,
    ) -> Result<PriceBreakdown, CartsServiceError> {
        let product = self.orderable_product(tx, item).await?;

        check_shape(&item.allocations)?;

        let charges = self.charges(tx, &item.allocations).await?;

        let unit = quote(
            &product,
            &QuoteRequest {
                material: item.material.clone(),
                cloth_provided: item.cloth_provided,
            },
        )?;

        Ok(order_price(unit.amount, item.quantity, &charges)?)
    }

    async fn orderable_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewCartItem,
    ) -> Result<ProductRecord, CartsServiceError> {
        let product = match self
            .products_repository
            .get_product(tx, item.product_uuid)
            .await
        {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => return Err(CartsServiceError::ProductNotFound),
            Err(error) => return Err(error.into()),
        };

        if !product.is_orderable() {
            return Err(CartsServiceError::ProductNotFound);
        }

        Ok(product)
    }

    async fn charges(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        allocations: &[SlotRequest],
    ) -> Result<Vec<AllocationCharge>, CartsServiceError> {
        let mut charges = Vec::with_capacity(allocations.len());

        for request in allocations {
            let date = self
                .dates_repository
                .get_date(tx, request.available_date())
                .await?
                .ok_or(AllocationError::DateNotFound(request.available_date()))?;

            charges.push(AllocationCharge {
                emergency_slot_cost: date.emergency_slot_cost,
                normal_slots_used: request.normal_slots_used,
                emergency_slots_used: request.emergency_slots_used,
            });
        }

        Ok(charges)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let price = self.price_item(&mut tx, &item).await?;

        let created = self
            .items_repository
            .create_cart_item(&mut tx, cart.uuid, &item, &price)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        self.items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart with its items, created empty on first access.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Price a line and add it to the user's cart. No slots are reserved.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove one line from the user's cart.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid)
    -> Result<(), CartsServiceError>;

    /// Empty the user's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
