//! Database module: row models, the `Store` seam and its backends.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring table rows
//! - `schema.rs`: SQL DDL for the local SQLite store
//! - `sqlite.rs`: `Store` over a local SQLite pool
//! - `postgrest.rs`: `Store` over the hosted PostgREST data API

pub mod models;
pub mod postgrest;
pub mod schema;
pub mod sqlite;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::auth::Session;
use crate::error::AppError;
pub use models::{
    AccountSupplier, NewScrapedOffer, NewSourceProduct, ProductListing, ScrapedOffer, Supplier,
    UserId,
};
pub use postgrest::PostgrestStore;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, SqliteStore};

/// Table-level operations the pages need. Every call is a single round trip;
/// the session is forwarded so a hosted store can apply row-level security.
#[async_trait]
pub trait Store: Send + Sync {
    /// All suppliers ordered by name ascending.
    async fn list_suppliers(&self, session: &Session) -> Result<Vec<Supplier>, AppError>;

    /// Supplier ids the user has enabled.
    async fn enabled_supplier_ids(
        &self,
        session: &Session,
        user_id: UserId,
    ) -> Result<HashSet<i64>, AppError>;

    /// Upsert `(user_id, supplier_id, enabled = true)` on the composite key.
    async fn enable_supplier(
        &self,
        session: &Session,
        user_id: UserId,
        supplier_id: i64,
    ) -> Result<(), AppError>;

    /// Delete the `(user_id, supplier_id)` mapping if present.
    async fn disable_supplier(
        &self,
        session: &Session,
        user_id: UserId,
        supplier_id: i64,
    ) -> Result<(), AppError>;

    /// All products with supplier names, newest first.
    async fn list_products(&self, session: &Session) -> Result<Vec<ProductListing>, AppError>;

    async fn insert_product(
        &self,
        session: &Session,
        product: NewSourceProduct,
    ) -> Result<(), AppError>;

    async fn get_product(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<Option<ProductListing>, AppError>;

    /// Offers for one product, newest first.
    async fn list_offers(
        &self,
        session: &Session,
        product_id: i64,
    ) -> Result<Vec<ScrapedOffer>, AppError>;

    async fn insert_offers(
        &self,
        session: &Session,
        offers: Vec<NewScrapedOffer>,
    ) -> Result<(), AppError>;
}
