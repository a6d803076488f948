use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ProductError;

/// Largest price the `NUMERIC(10,2)` column can hold: 99999999.99
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Custom validator: prices may be zero but never negative, and must fit the column
fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    if *price > max_price() {
        return Err(validator::ValidationError::new("price_too_large"));
    }
    Ok(())
}

/// Product category
///
/// Stored as the Postgres enum type `category`; on the wire it is the
/// upper-case name. Parsing ignores ASCII case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Category::from_str(&raw)
            .map_err(|_| de::Error::custom(format!("unknown category '{}'", raw)))
    }
}

/// Product entity - an item in the store's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, immutable
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hat")]
    pub name: String,
    #[schema(example = "A red fedora")]
    pub description: String,
    /// Decimal string with two fractional digits
    #[schema(value_type = String, example = "59.95")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    /// Builds the stored form of `input` under an existing id
    pub fn from_new(id: i32, input: NewProduct) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            available: input.available,
            category: input.category,
        }
    }
}

/// Request body for create and update
///
/// An `id` key in the body is ignored; the store assigns ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Hat")]
    pub name: String,
    #[validate(length(max = 250))]
    #[schema(example = "A red fedora")]
    pub description: String,
    /// Accepts a decimal string or a JSON number
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "59.95")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

/// Query string for `GET /products`
///
/// Only one filter applies: `name` wins over `category`, which wins over
/// `available`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact product name
    pub name: Option<String>,
    /// Category name, case-insensitive
    pub category: Option<String>,
    /// `true`, `yes` or `1` select available products; anything else unavailable ones
    pub available: Option<String>,
}

/// The single lookup a list request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLookup {
    All,
    ByName(String),
    ByCategory(Category),
    ByAvailability(bool),
}

impl TryFrom<ProductQuery> for ProductLookup {
    type Error = ProductError;

    fn try_from(query: ProductQuery) -> Result<Self, Self::Error> {
        if let Some(name) = query.name {
            return Ok(Self::ByName(name));
        }
        if let Some(raw) = query.category {
            let category =
                Category::from_str(raw.trim()).map_err(|_| ProductError::UnknownCategory(raw))?;
            return Ok(Self::ByCategory(category));
        }
        if let Some(raw) = query.available {
            return Ok(Self::ByAvailability(parse_truthy(&raw)));
        }
        Ok(Self::All)
    }
}

fn parse_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}
