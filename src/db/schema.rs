//! SQL DDL for the local SQLite store.
//! Mirrors the hosted tables; the hosted project owns its own schema.

/// SQLite schema with:
/// - `suppliers`, `source_products`, `scraped_offers` keyed by INTEGER ids
/// - foreign keys from products to suppliers and from offers to products
/// - `account_suppliers` keyed by the composite `(user_id, supplier_id)`
/// - timestamps as RFC3339 text (fixed precision so text order is time order)
/// - prices as decimal text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS suppliers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    website TEXT NULL
);

CREATE TABLE IF NOT EXISTS source_products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    source_url TEXT NOT NULL,
    supplier_id INTEGER NOT NULL REFERENCES suppliers(id),
    created_by TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS scraped_offers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_product_id INTEGER NOT NULL REFERENCES source_products(id),
    title TEXT NULL,
    price TEXT NOT NULL,
    currency TEXT NOT NULL,
    in_stock INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS account_suppliers (
    user_id TEXT NOT NULL,
    supplier_id INTEGER NOT NULL REFERENCES suppliers(id),
    enabled INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (user_id, supplier_id)
);

CREATE INDEX IF NOT EXISTS idx_source_products_created_at ON source_products(created_at);
CREATE INDEX IF NOT EXISTS idx_scraped_offers_product ON scraped_offers(source_product_id, created_at);
"#;
