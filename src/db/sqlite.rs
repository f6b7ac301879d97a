use crate::auth::Session;
use crate::db::Store;
use crate::db::models::{
    NewScrapedOffer, NewSourceProduct, ProductListing, ScrapedOffer, Supplier, UserId,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::collections::HashSet;
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.title, p.source_url, p.supplier_id, p.created_at, s.name AS supplier_name
    FROM source_products p
    LEFT JOIN suppliers s ON s.id = p.supplier_id"#;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let mut pool_opts = SqlitePoolOptions::new().max_connections(5);
        if database_url.contains(":memory:") {
            // An in-memory database lives and dies with its single connection.
            pool_opts = pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    fn row_to_listing(row: SqliteRow) -> Result<ProductListing, AppError> {
        let created_at: String = row.try_get("created_at")?;
        Ok(ProductListing {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            source_url: row.try_get("source_url")?,
            supplier_id: row.try_get("supplier_id")?,
            supplier_name: row.try_get("supplier_name")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }

    fn row_to_offer(row: SqliteRow) -> Result<ScrapedOffer, AppError> {
        let price: String = row.try_get("price")?;
        let created_at: String = row.try_get("created_at")?;
        let in_stock: i64 = row.try_get("in_stock")?;
        Ok(ScrapedOffer {
            id: row.try_get("id")?,
            source_product_id: row.try_get("source_product_id")?,
            title: row.try_get("title")?,
            price: Decimal::from_str(&price)
                .map_err(|e| AppError::Decode(format!("price {price:?}: {e}")))?,
            currency: row.try_get("currency")?,
            in_stock: in_stock != 0,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_suppliers(&self, _session: &Session) -> Result<Vec<Supplier>, AppError> {
        let rows = sqlx::query("SELECT id, name, website FROM suppliers ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| -> Result<Supplier, AppError> {
                Ok(Supplier {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    website: row.try_get("website")?,
                })
            })
            .collect()
    }

    async fn enabled_supplier_ids(
        &self,
        _session: &Session,
        user_id: UserId,
    ) -> Result<HashSet<i64>, AppError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT supplier_id FROM account_suppliers WHERE user_id = ? AND enabled = 1",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Uses SQLite `INSERT ... ON CONFLICT(user_id, supplier_id) DO UPDATE`.
    async fn enable_supplier(
        &self,
        _session: &Session,
        user_id: UserId,
        supplier_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO account_suppliers (user_id, supplier_id, enabled)
            VALUES (?, ?, 1)
            ON CONFLICT(user_id, supplier_id) DO UPDATE SET enabled = excluded.enabled
            "#,
        )
        .bind(user_id.to_string())
        .bind(supplier_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn disable_supplier(
        &self,
        _session: &Session,
        user_id: UserId,
        supplier_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM account_suppliers WHERE user_id = ? AND supplier_id = ?")
            .bind(user_id.to_string())
            .bind(supplier_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_products(&self, _session: &Session) -> Result<Vec<ProductListing>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_listing).collect()
    }

    async fn insert_product(
        &self,
        _session: &Session,
        product: NewSourceProduct,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO source_products (title, source_url, supplier_id, created_by, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(product.title)
        .bind(product.source_url)
        .bind(product.supplier_id)
        .bind(product.created_by.to_string())
        .bind(format_timestamp(&product.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_product(
        &self,
        _session: &Session,
        id: i64,
    ) -> Result<Option<ProductListing>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} WHERE p.id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_listing).transpose()
    }

    async fn list_offers(
        &self,
        _session: &Session,
        product_id: i64,
    ) -> Result<Vec<ScrapedOffer>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, source_product_id, title, price, currency, in_stock, created_at
               FROM scraped_offers WHERE source_product_id = ?
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_offer).collect()
    }

    /// Inserts all offers in one transaction.
    async fn insert_offers(
        &self,
        _session: &Session,
        offers: Vec<NewScrapedOffer>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for offer in offers {
            sqlx::query(
                r#"INSERT INTO scraped_offers
                   (source_product_id, title, price, currency, in_stock, created_at)
                   VALUES (?, ?, ?, ?, ?, ?)"#,
            )
            .bind(offer.source_product_id)
            .bind(offer.title)
            .bind(offer.price.to_string())
            .bind(offer.currency)
            .bind(if offer.in_stock { 1 } else { 0 })
            .bind(format_timestamp(&offer.created_at))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Decode(format!("timestamp {raw:?}: {e}")))
}
