use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub website: Option<String>,
}

/// A source product joined with its supplier's display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductListing {
    pub id: i64,
    pub title: String,
    pub source_url: String,
    pub supplier_id: i64,
    pub supplier_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSourceProduct {
    pub title: String,
    pub source_url: String,
    pub supplier_id: i64,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapedOffer {
    pub id: i64,
    pub source_product_id: i64,
    pub title: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewScrapedOffer {
    pub source_product_id: i64,
    pub title: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSupplier {
    pub user_id: UserId,
    pub supplier_id: i64,
    pub enabled: bool,
}
