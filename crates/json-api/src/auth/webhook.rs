//! Shared-secret guard for payment provider callbacks.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{extensions::*, responses::ApiError, state::State};

pub(crate) const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verified = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => match &state.webhook_secret {
            Some(secret) => req
                .header::<String>(WEBHOOK_SECRET_HEADER)
                .is_some_and(|presented| secret.verify(&presented)),
            None => {
                warn!("payment callback refused: no webhook secret configured");

                false
            }
        },
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !verified {
        res.render(ApiError::unauthorized("Invalid webhook secret"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, test::TestClient};
    use testresult::TestResult;
    use vestry_app::auth::WebhookSecret;

    use crate::test_helpers::Mocks;

    use super::*;

    #[salvo::handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service(secret: Option<&str>) -> Service {
        let state = Mocks::default().into_state_with_secret(secret.map(WebhookSecret::new));

        Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(handler)
                .push(Router::new().post(ok)),
        )
    }

    #[tokio::test]
    async fn test_matching_secret_passes() -> TestResult {
        let res = TestClient::post("http://example.com")
            .add_header(WEBHOOK_SECRET_HEADER, "whsec_test", true)
            .send(&make_service(Some("whsec_test")))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_secret_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com")
            .add_header(WEBHOOK_SECRET_HEADER, "whsec_other", true)
            .send(&make_service(Some("whsec_test")))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_header_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com")
            .send(&make_service(Some("whsec_test")))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_secret_refuses_everything() -> TestResult {
        let res = TestClient::post("http://example.com")
            .add_header(WEBHOOK_SECRET_HEADER, "", true)
            .send(&make_service(None))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
