//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, IdentityProviderClient, PgAuthService},
    database::{self, Db},
    domain::{
        available_dates::{AvailableDatesService, PgAvailableDatesService},
        carts::{CartsService, PgCartsService},
        contacts::{ContactsService, PgContactsService},
        notifications::{NotificationsService, PgNotificationsService, records::NotificationSettings},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub available_dates: Arc<dyn AvailableDatesService>,
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub contacts: Arc<dyn ContactsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        identity_provider: IdentityProviderClient,
        notifications: NotificationSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let users: Arc<dyn UsersService> = Arc::new(PgUsersService::new(db.clone()));

        Ok(Self {
            available_dates: Arc::new(PgAvailableDatesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            users: users.clone(),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            contacts: Arc::new(PgContactsService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db, notifications)),
            auth: Arc::new(PgAuthService::new(users, Arc::new(identity_provider))),
        })
    }
}
