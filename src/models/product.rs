//! Product model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product. Client-supplied ids are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

/// Full replacement payload for an existing product
pub type ProductUpdate = ProductCreate;

/// Raw query string of the product listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQueryParams {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Price,
    Quantity,
    Name,
}

impl SortField {
    pub const ALLOWED: [&'static str; 3] = ["price", "quantity", "name"];

    pub fn column(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Quantity => "quantity",
            SortField::Name => "name",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "price" => Some(SortField::Price),
            "quantity" => Some(SortField::Quantity),
            "name" => Some(SortField::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated listing parameters handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub skip: i64,
    pub limit: i64,
}

impl ProductFilter {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            min_price: None,
            max_price: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
