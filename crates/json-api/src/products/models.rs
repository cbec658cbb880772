//! Product Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry::pricing::{ClothDiscount, Material, PriceBasis, UnitPrice};
use vestry_app::domain::products::{data::ProductDetails, records::ProductRecord};

use crate::{extensions::parse_money, responses::ApiError};

/// Fabric option and its surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MaterialBody {
    pub name: String,

    /// Added to the base price, e.g. `"45.00"`
    pub additional_cost: String,
}

impl From<Material> for MaterialBody {
    fn from(material: Material) -> Self {
        Self {
            name: material.name,
            additional_cost: material.additional_cost.to_string(),
        }
    }
}

impl TryFrom<MaterialBody> for Material {
    type Error = ApiError;

    fn try_from(body: MaterialBody) -> Result<Self, Self::Error> {
        Ok(Self {
            additional_cost: parse_money(&body.additional_cost, "additional_cost")?,
            name: body.name,
        })
    }
}

/// Discount for customer-provided cloth.
///
/// `kind` is `percentage` (value is a fraction, `"0.1"` for ten percent) or
/// `fixed` (value is an amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClothDiscountBody {
    pub kind: String,
    pub value: String,
}

impl From<ClothDiscount> for ClothDiscountBody {
    fn from(discount: ClothDiscount) -> Self {
        let (kind, value) = match discount {
            ClothDiscount::Percentage { value } => ("percentage", value),
            ClothDiscount::Fixed { value } => ("fixed", value),
        };

        Self {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

impl TryFrom<ClothDiscountBody> for ClothDiscount {
    type Error = ApiError;

    fn try_from(body: ClothDiscountBody) -> Result<Self, Self::Error> {
        let value = parse_money(&body.value, "cloth_provided_discount.value")?;

        match body.kind.as_str() {
            "percentage" => Ok(Self::Percentage { value }),
            "fixed" => Ok(Self::Fixed { value }),
            other => Err(ApiError::bad_request(format!(
                "unknown discount kind \"{other}\""
            ))),
        }
    }
}

/// Discount as sent by clients: either tagged, or a bare amount from older
/// catalogues where values up to `"1"` are fractions and larger ones are
/// fixed amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ClothDiscountInput {
    Tagged(ClothDiscountBody),
    Legacy(String),
}

impl TryFrom<ClothDiscountInput> for ClothDiscount {
    type Error = ApiError;

    fn try_from(input: ClothDiscountInput) -> Result<Self, Self::Error> {
        match input {
            ClothDiscountInput::Tagged(body) => Self::try_from(body),
            ClothDiscountInput::Legacy(value) => Ok(Self::from_legacy(parse_money(
                &value,
                "cloth_provided_discount",
            )?)),
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub denomination: String,
    pub description: String,
    pub base_price: String,
    pub materials: Vec<MaterialBody>,
    pub cloth_provided_discount: ClothDiscountBody,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(record: ProductRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            name: record.name,
            denomination: record.denomination,
            description: record.description,
            base_price: record.base_price.to_string(),
            materials: record.materials.into_iter().map(Into::into).collect(),
            cloth_provided_discount: record.cloth_provided_discount.into(),
            is_active: record.is_active,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Product Request
///
/// Used for both create and full replacement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub denomination: String,

    #[serde(default)]
    pub description: String,

    /// Price before material or discount, e.g. `"450.00"`
    pub base_price: String,

    #[serde(default)]
    pub materials: Vec<MaterialBody>,

    /// Defaults to no discount
    pub cloth_provided_discount: Option<ClothDiscountInput>,

    /// Defaults to `true`
    pub is_active: Option<bool>,
}

impl TryFrom<ProductRequest> for ProductDetails {
    type Error = ApiError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        if request.name.trim().is_empty() {
            return Err(ApiError::bad_request("\"name\" must not be empty"));
        }

        Ok(Self {
            name: request.name,
            denomination: request.denomination,
            description: request.description,
            base_price: parse_money(&request.base_price, "base_price")?,
            materials: request
                .materials
                .into_iter()
                .map(Material::try_from)
                .collect::<Result<_, _>>()?,
            cloth_provided_discount: request
                .cloth_provided_discount
                .map(ClothDiscount::try_from)
                .transpose()?
                .unwrap_or_default(),
            is_active: request.is_active.unwrap_or(true),
        })
    }
}

/// Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    /// Price of one unit
    pub unit_price: String,

    /// `cloth_provided`, `material`, `base` or `unknown_material`
    pub basis: String,
}

impl From<UnitPrice> for QuoteResponse {
    fn from(price: UnitPrice) -> Self {
        let basis = match price.basis {
            PriceBasis::ClothProvided => "cloth_provided",
            PriceBasis::Material => "material",
            PriceBasis::Base => "base",
            PriceBasis::UnknownMaterial => "unknown_material",
        };

        Self {
            unit_price: price.amount.to_string(),
            basis: basis.to_string(),
        }
    }
}
