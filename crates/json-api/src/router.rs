//! App Router

use salvo::Router;

use crate::{
    auth, available_dates, carts, contacts, healthcheck, notifications, orders, payments,
    products, users,
};

/// Routes anyone may call.
fn public_routes() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("available-dates").get(available_dates::index::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("quote").post(products::quote::handler)),
                ),
        )
        .push(Router::with_path("contact").post(contacts::create::handler))
}

/// Routes for any signed-in user, acting on their own data.
fn customer_routes() -> Router {
    Router::new()
        .push(Router::with_path("available-dates/check").post(available_dates::check::handler))
        .push(
            Router::with_path("me")
                .get(users::me::handler)
                .put(users::update_me::handler),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(Router::with_path("checkout").post(carts::checkout::handler))
                .push(
                    Router::with_path("items")
                        .post(carts::add_item::handler)
                        .push(Router::with_path("{item}").delete(carts::remove_item::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}

/// Back-office routes, mounted under `/admin`.
fn admin_routes() -> Router {
    Router::with_path("admin")
        .hoop(auth::admin::handler)
        .push(
            Router::with_path("available-dates")
                .get(available_dates::admin_index::handler)
                .post(available_dates::create::handler)
                .delete(available_dates::cleanup::handler)
                .push(Router::with_path("bulk").post(available_dates::bulk::handler))
                .push(
                    Router::with_path("{date}")
                        .put(available_dates::update::handler)
                        .delete(available_dates::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::admin_index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::admin_get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .push(Router::with_path("{user}/role").put(users::role::handler)),
        )
        .push(
            Router::with_path("contacts")
                .get(contacts::index::handler)
                .push(
                    Router::with_path("{contact}")
                        .put(contacts::update::handler)
                        .delete(contacts::delete::handler),
                ),
        )
        .push(Router::with_path("notifications").get(notifications::report::handler))
}

/// Callbacks from the payment provider, authenticated by shared secret.
fn webhook_routes() -> Router {
    Router::with_path("payments/outcome")
        .hoop(auth::webhook::handler)
        .post(payments::outcome::handler)
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_routes())
        .push(webhook_routes())
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(customer_routes())
                .push(admin_routes()),
        )
}
