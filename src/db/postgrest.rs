use crate::auth::Session;
use crate::db::Store;
use crate::db::models::{
    AccountSupplier, NewScrapedOffer, NewSourceProduct, ProductListing, ScrapedOffer, Supplier,
    UserId,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

const PRODUCT_SELECT: &str = "id,title,source_url,supplier_id,created_at,supplier:suppliers(name)";
const OFFER_SELECT: &str = "id,source_product_id,title,price,currency,in_stock,created_at";

/// `Store` over a hosted PostgREST data API (`{project}/rest/v1/`).
#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    rest_url: Url,
    anon_key: String,
}

impl PostgrestStore {
    pub fn new(
        client: reqwest::Client,
        project_url: &Url,
        anon_key: impl Into<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client,
            rest_url: project_url.join("rest/v1/")?,
            anon_key: anon_key.into(),
        })
    }

    /// Requests carry the caller's access token so row-level security applies;
    /// anonymous callers fall back to the anon key.
    fn request(
        &self,
        method: Method,
        table: &str,
        session: &Session,
    ) -> Result<RequestBuilder, AppError> {
        let url = self.rest_url.join(table)?;
        let bearer = session.access_token().unwrap_or(&self.anon_key);
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .header("Accept", "application/json"))
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Vec<T>, AppError> {
        let resp = check_status(req.send().await?).await?;
        Ok(resp.json::<Vec<T>>().await?)
    }

    async fn execute(&self, req: RequestBuilder) -> Result<(), AppError> {
        check_status(req.send().await?).await?;
        Ok(())
    }
}

async fn check_status(resp: Response) -> Result<Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    debug!(status = %status, body = %body, "data API returned an error");
    Err(AppError::UpstreamStatus(status))
}

/// `source_products` row with the embedded `supplier:suppliers(name)` relation.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    title: String,
    source_url: String,
    supplier_id: i64,
    created_at: DateTime<Utc>,
    #[serde(default)]
    supplier: Option<SupplierName>,
}

#[derive(Debug, Deserialize)]
struct SupplierName {
    name: String,
}

impl From<ProductRow> for ProductListing {
    fn from(row: ProductRow) -> Self {
        ProductListing {
            id: row.id,
            title: row.title,
            source_url: row.source_url,
            supplier_id: row.supplier_id,
            supplier_name: row.supplier.map(|s| s.name),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupplierIdRow {
    supplier_id: i64,
}

#[async_trait]
impl Store for PostgrestStore {
    async fn list_suppliers(&self, session: &Session) -> Result<Vec<Supplier>, AppError> {
        let req = self
            .request(Method::GET, "suppliers", session)?
            .query(&[("select", "id,name,website"), ("order", "name.asc")]);
        self.fetch(req).await
    }

    async fn enabled_supplier_ids(
        &self,
        session: &Session,
        user_id: UserId,
    ) -> Result<HashSet<i64>, AppError> {
        let req = self.request(Method::GET, "account_suppliers", session)?.query(&[
            ("select", "supplier_id".to_string()),
            ("user_id", format!("eq.{user_id}")),
            ("enabled", "eq.true".to_string()),
        ]);
        let rows: Vec<SupplierIdRow> = self.fetch(req).await?;
        Ok(rows.into_iter().map(|r| r.supplier_id).collect())
    }

    async fn enable_supplier(
        &self,
        session: &Session,
        user_id: UserId,
        supplier_id: i64,
    ) -> Result<(), AppError> {
        let row = AccountSupplier {
            user_id,
            supplier_id,
            enabled: true,
        };
        let req = self
            .request(Method::POST, "account_suppliers", session)?
            .query(&[("on_conflict", "user_id,supplier_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row);
        debug!(%user_id, supplier_id, "upserting account supplier");
        self.execute(req).await
    }

    async fn disable_supplier(
        &self,
        session: &Session,
        user_id: UserId,
        supplier_id: i64,
    ) -> Result<(), AppError> {
        let req = self
            .request(Method::DELETE, "account_suppliers", session)?
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                ("supplier_id", format!("eq.{supplier_id}")),
            ])
            .header("Prefer", "return=minimal");
        debug!(%user_id, supplier_id, "deleting account supplier");
        self.execute(req).await
    }

    async fn list_products(&self, session: &Session) -> Result<Vec<ProductListing>, AppError> {
        let req = self
            .request(Method::GET, "source_products", session)?
            .query(&[("select", PRODUCT_SELECT), ("order", "created_at.desc,id.desc")]);
        let rows: Vec<ProductRow> = self.fetch(req).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_product(
        &self,
        session: &Session,
        product: NewSourceProduct,
    ) -> Result<(), AppError> {
        let req = self
            .request(Method::POST, "source_products", session)?
            .header("Prefer", "return=minimal")
            .json(&product);
        self.execute(req).await
    }

    async fn get_product(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<Option<ProductListing>, AppError> {
        let req = self.request(Method::GET, "source_products", session)?.query(&[
            ("select", PRODUCT_SELECT.to_string()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_string()),
        ]);
        let rows: Vec<ProductRow> = self.fetch(req).await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn list_offers(
        &self,
        session: &Session,
        product_id: i64,
    ) -> Result<Vec<ScrapedOffer>, AppError> {
        let req = self.request(Method::GET, "scraped_offers", session)?.query(&[
            ("select", OFFER_SELECT.to_string()),
            ("source_product_id", format!("eq.{product_id}")),
            ("order", "created_at.desc,id.desc".to_string()),
        ]);
        self.fetch(req).await
    }

    /// One bulk insert: PostgREST accepts a JSON array body.
    async fn insert_offers(
        &self,
        session: &Session,
        offers: Vec<NewScrapedOffer>,
    ) -> Result<(), AppError> {
        let req = self
            .request(Method::POST, "scraped_offers", session)?
            .header("Prefer", "return=minimal")
            .json(&offers);
        self.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_url_is_rooted_at_project() {
        let project = Url::parse("https://demo.supabase.co").unwrap();
        let store = PostgrestStore::new(reqwest::Client::new(), &project, "anon").unwrap();
        assert_eq!(store.rest_url.as_str(), "https://demo.supabase.co/rest/v1/");
        assert_eq!(
            store.rest_url.join("suppliers").unwrap().as_str(),
            "https://demo.supabase.co/rest/v1/suppliers"
        );
    }

    #[test]
    fn product_row_flattens_embedded_supplier() {
        let payload = r#"{
            "id": 7,
            "title": "Kettle",
            "source_url": "https://shop.example/kettle",
            "supplier_id": 2,
            "created_at": "2024-05-01T10:00:00.123456+00:00",
            "supplier": { "name": "Acme" }
        }"#;
        let row: ProductRow = serde_json::from_str(payload).unwrap();
        let listing: ProductListing = row.into();
        assert_eq!(listing.supplier_name.as_deref(), Some("Acme"));
        assert_eq!(listing.id, 7);
    }

    #[test]
    fn offer_accepts_numeric_price() {
        let payload = r#"{
            "id": 1, "source_product_id": 7, "title": null, "price": 22.0,
            "currency": "USD", "in_stock": false,
            "created_at": "2024-05-01T10:00:00+00:00"
        }"#;
        let offer: ScrapedOffer = serde_json::from_str(payload).unwrap();
        assert_eq!(offer.price, rust_decimal::Decimal::new(22, 0));
        assert!(offer.title.is_none());
    }
}
