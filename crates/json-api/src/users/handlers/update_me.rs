//! Update Own Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use vestry_app::domain::users::data::ProfileUpdate;

use crate::{
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
    users::{errors::into_api_error, models::UserResponse},
};

/// Profile Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(request: ProfileRequest) -> Self {
        Self {
            name: request.name,
            phone: request.phone,
        }
    }
}

/// Update Own Profile Handler
#[endpoint(
    tags("users"),
    summary = "Update Own Profile",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "users.update_me",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ProfileRequest>,
    depot: &mut Depot,
) -> Result<Envelope<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user_uuid));

    let user = state
        .app
        .users
        .update_profile(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vestry_app::domain::users::{
        MockUsersService,
        records::{UserRecord, UserRole},
    };

    use crate::{
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
        users::models::fixtures::make_user,
    };

    use super::*;

    #[tokio::test]
    async fn test_updates_only_given_fields() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && *update
                        == ProfileUpdate {
                            name: None,
                            phone: Some("+44 20 7946 0000".to_string()),
                        }
            })
            .return_once(|user, update| {
                Ok(UserRecord {
                    phone: update.phone,
                    ..make_user(user, UserRole::Customer)
                })
            });

        let service = customer_service(
            Mocks {
                users,
                ..Mocks::default()
            },
            Router::with_path("me").put(handler),
        );

        let mut res = TestClient::put("http://example.com/me")
            .json(&json!({ "phone": "+44 20 7946 0000" }))
            .send(&service)
            .await;

        let body: Envelope<UserResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.phone.as_deref(), Some("+44 20 7946 0000"));

        Ok(())
    }
}
