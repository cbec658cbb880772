//! Test helpers.

use std::sync::Arc;

use salvo::{
    affix_state::{AffixList, inject},
    prelude::*,
};
use uuid::Uuid;
use vestry_app::{
    auth::{MockAuthService, Principal, WebhookSecret},
    context::AppContext,
    domain::{
        available_dates::MockAvailableDatesService, carts::MockCartsService,
        contacts::MockContactsService, notifications::MockNotificationsService,
        orders::MockOrdersService, products::MockProductsService, users::MockUsersService,
        users::records::{UserRole, UserUuid},
    },
};

use crate::state::State;

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_WEBHOOK_SECRET: &str = "whsec_test";

/// One mock per service; unset mocks fail on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) available_dates: MockAvailableDatesService,
    pub(crate) products: MockProductsService,
    pub(crate) users: MockUsersService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) contacts: MockContactsService,
    pub(crate) notifications: MockNotificationsService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        self.into_state_with_secret(Some(WebhookSecret::new(TEST_WEBHOOK_SECRET)))
    }

    pub(crate) fn into_state_with_secret(self, secret: Option<WebhookSecret>) -> Arc<State> {
        let app = AppContext {
            available_dates: Arc::new(self.available_dates),
            products: Arc::new(self.products),
            users: Arc::new(self.users),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            contacts: Arc::new(self.contacts),
            notifications: Arc::new(self.notifications),
            auth: Arc::new(self.auth),
        };

        State::from_app_context(app, secret)
    }
}

pub(crate) fn customer() -> Principal {
    Principal {
        user_uuid: TEST_USER_UUID,
        email: "customer@example.com".to_string(),
        name: Some("Fr. Brown".to_string()),
        role: UserRole::Customer,
    }
}

pub(crate) fn admin() -> Principal {
    Principal {
        user_uuid: UserUuid::from_uuid(Uuid::max()),
        email: "admin@example.com".to_string(),
        name: None,
        role: UserRole::Admin,
    }
}

pub(crate) fn inject_principal(principal: Principal) -> AffixList {
    inject(principal)
}

/// Serve `route` without an authenticated caller.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Serve `route` as the test customer.
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_principal(customer()))
            .push(route),
    )
}

/// Serve `route` as an administrator.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_principal(admin()))
            .push(route),
    )
}
