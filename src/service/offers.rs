use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::{Mutation, SkipReason};
use crate::auth::Session;
use crate::db::{NewScrapedOffer, ProductListing, ScrapedOffer, Store};
use crate::error::AppError;

pub struct ProductDetail {
    pub product: ProductListing,
    pub offers: Vec<ScrapedOffer>,
}

/// The product and its offers newest first. `NotFound` when the product is missing.
pub async fn load_detail(
    store: &dyn Store,
    session: &Session,
    product_id: i64,
) -> Result<ProductDetail, AppError> {
    let (product, offers) = tokio::try_join!(
        store.get_product(session, product_id),
        store.list_offers(session, product_id)
    )?;
    let product = product.ok_or(AppError::NotFound)?;
    Ok(ProductDetail { product, offers })
}

/// The three synthetic offers inserted by the seed action, sharing one timestamp.
pub fn dummy_offers(product_id: i64, now: DateTime<Utc>) -> Vec<NewScrapedOffer> {
    [
        ("Offer A", Decimal::new(1999, 2), true),
        ("Offer B", Decimal::new(1749, 2), true),
        ("Offer C", Decimal::new(2200, 2), false),
    ]
    .into_iter()
    .map(|(title, price, in_stock)| NewScrapedOffer {
        source_product_id: product_id,
        title: Some(title.to_string()),
        price,
        currency: "USD".to_string(),
        in_stock,
        created_at: now,
    })
    .collect()
}

pub async fn seed_dummy_offers(
    store: &dyn Store,
    session: &Session,
    product_id: Option<i64>,
) -> Result<Mutation, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(Mutation::Skipped(SkipReason::Unauthenticated));
    };
    let Some(product_id) = product_id else {
        return Ok(Mutation::Skipped(SkipReason::InvalidInput("id")));
    };

    store
        .insert_offers(session, dummy_offers(product_id, Utc::now()))
        .await?;
    info!(%user_id, product_id, "seeded dummy offers");
    Ok(Mutation::Applied)
}
