//! Admin guard.

use salvo::prelude::*;
use tracing::warn;
use vestry_app::auth::Principal;

use crate::{extensions::*, responses::ApiError};

/// Refuse callers without the admin role. Runs after the auth middleware.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.principal_or_401().map(Principal::is_admin) {
        Ok(true) => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(false) => {
            warn!(path = %req.uri().path(), "admin route refused");

            res.render(ApiError::forbidden("Admin access required"));
            ctrl.skip_rest();
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{admin, customer, inject_principal};

    use super::*;

    #[salvo::handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service(principal: Option<Principal>) -> Service {
        let mut router = Router::new();

        if let Some(principal) = principal {
            router = router.hoop(inject_principal(principal));
        }

        Service::new(router.hoop(handler).push(Router::new().get(ok)))
    }

    #[tokio::test]
    async fn test_admin_passes() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(admin())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(customer())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(None))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
