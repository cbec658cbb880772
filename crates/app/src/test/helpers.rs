//! Test Helpers

use jiff::civil::Date;
use rust_decimal::dec;
use vestry::pricing::{ClothDiscount, Material};

use crate::{
    domain::{
        available_dates::{
            AvailableDatesService, AvailableDatesServiceError,
            data::{NewAvailableDate, SlotRequest},
            records::AvailableDateRecord,
        },
        carts::{data::NewCartItem, records::CartItemUuid},
        contacts::{data::NewContact, records::ContactUuid},
        orders::{
            data::{CustomerDetails, NewOrder},
            records::OrderUuid,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, ProductDetails},
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError, data::VerifiedIdentity, records::UserRecord,
        },
    },
    test::TestContext,
};

pub(crate) async fn create_date(
    ctx: &TestContext,
    date: Date,
    normal_slots: u32,
    emergency_slots: u32,
) -> Result<AvailableDateRecord, AvailableDatesServiceError> {
    ctx.available_dates
        .create_date(NewAvailableDate {
            normal_slots,
            emergency_slots,
            ..NewAvailableDate::with_defaults(date)
        })
        .await
}

pub(crate) fn chasuble_details() -> ProductDetails {
    ProductDetails {
        name: "Chasuble".to_string(),
        denomination: "catholic".to_string(),
        description: "Gothic cut chasuble".to_string(),
        base_price: dec!(1000),
        materials: vec![
            Material {
                name: "Silk Damask".to_string(),
                additional_cost: dec!(250),
            },
            Material {
                name: "Linen".to_string(),
                additional_cost: dec!(0),
            },
        ],
        cloth_provided_discount: ClothDiscount::Percentage { value: dec!(0.1) },
        is_active: true,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            details: chasuble_details(),
        })
        .await
}

pub(crate) fn identity(external_id: &str, email: &str) -> VerifiedIdentity {
    VerifiedIdentity {
        external_id: external_id.to_string(),
        email: email.to_string(),
        name: None,
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    handle: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .sync_identity(identity(handle, &format!("{handle}@example.com")))
        .await
}

pub(crate) fn new_cart_item(product: ProductUuid) -> NewCartItem {
    NewCartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        material: None,
        cloth_provided: false,
        quantity: 1,
        allocations: Vec::new(),
        measurements: None,
        notes: None,
    }
}

pub(crate) fn new_order(product: ProductUuid, allocations: Vec<SlotRequest>) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        product_uuid: product,
        material: None,
        cloth_provided: false,
        quantity: 1,
        allocations,
        measurements: Some("chest 104cm, length 120cm".to_string()),
        notes: None,
        customer: CustomerDetails::default(),
    }
}

pub(crate) fn new_contact(name: &str) -> NewContact {
    NewContact {
        uuid: ContactUuid::new(),
        name: name.to_string(),
        email: "enquiries@example.com".to_string(),
        phone: None,
        subject: "Commission".to_string(),
        message: "Could you make a matching stole?".to_string(),
    }
}
