//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use vestry_app::domain::products::{
    data::{NewProduct, ProductDetails},
    records::ProductUuid,
};

use crate::{
    extensions::*,
    products::{
        errors::into_api_error,
        models::{ProductRequest, ProductResponse},
    },
    responses::{ApiError, Envelope},
    state::State,
};

/// Create Product Handler
#[endpoint(
    tags("admin"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = NewProduct {
        uuid: ProductUuid::new(),
        details: ProductDetails::try_from(json.into_inner())?,
    };

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product.uuid));

    let record = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/products/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::new(record.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vestry::pricing::{ClothDiscount, PricingError};
    use vestry_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::{
        products::models::fixtures::make_product,
        responses::ErrorResponse,
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        admin_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("admin/products").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_product() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.details.name == "Chasuble"
                    && new.details.base_price == dec!(450.00)
                    && new.details.materials.len() == 1
            })
            .return_once(|new| Ok(make_product(new.uuid)));

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "name": "Chasuble",
                "denomination": "catholic",
                "base_price": "450.00",
                "materials": [{ "name": "Silk Damask", "additional_cost": "45.00" }],
                "cloth_provided_discount": { "kind": "percentage", "value": "0.1" }
            }))
            .send(&make_service(products))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;
        let location = res
            .headers()
            .get("location")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{}", body.data.uuid)));

        Ok(())
    }

    #[tokio::test]
    async fn test_bare_discount_amount_is_read_as_legacy_value() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.details.cloth_provided_discount == ClothDiscount::Fixed { value: dec!(40) }
            })
            .return_once(|new| Ok(make_product(new.uuid)));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "name": "Cope",
                "denomination": "catholic",
                "base_price": "800",
                "cloth_provided_discount": "40"
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_discount_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| {
                Err(ProductsServiceError::InvalidPrice(
                    PricingError::InvalidPercentage(dec!(1.5)),
                ))
            });

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "name": "Cope",
                "denomination": "catholic",
                "base_price": "800",
                "cloth_provided_discount": { "kind": "percentage", "value": "1.5" }
            }))
            .send(&make_service(products))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "percentage discount 1.5 must be between 0 and 1");

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_price_never_reaches_service() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "name": "Cope",
                "denomination": "catholic",
                "base_price": "eight hundred"
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
