use chrono::Utc;
use tracing::info;

use super::{Mutation, SkipReason, non_empty, parse_id};
use crate::auth::Session;
use crate::db::{NewSourceProduct, ProductListing, Store, Supplier};
use crate::error::AppError;
use crate::types::forms::CreateProductForm;

pub struct Catalog {
    pub suppliers: Vec<Supplier>,
    pub products: Vec<ProductListing>,
}

/// Suppliers for the picker and products newest first, fetched concurrently.
pub async fn load_catalog(store: &dyn Store, session: &Session) -> Result<Catalog, AppError> {
    let (suppliers, products) =
        tokio::try_join!(store.list_suppliers(session), store.list_products(session))?;
    Ok(Catalog {
        suppliers,
        products,
    })
}

pub async fn create_product(
    store: &dyn Store,
    session: &Session,
    form: &CreateProductForm,
) -> Result<Mutation, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(Mutation::Skipped(SkipReason::Unauthenticated));
    };
    let Some(title) = non_empty(form.title.as_deref()) else {
        return Ok(Mutation::Skipped(SkipReason::InvalidInput("title")));
    };
    let Some(source_url) = non_empty(form.source_url.as_deref()) else {
        return Ok(Mutation::Skipped(SkipReason::InvalidInput("source_url")));
    };
    let Some(supplier_id) = parse_id(form.supplier_id.as_deref()) else {
        return Ok(Mutation::Skipped(SkipReason::InvalidInput("supplier_id")));
    };

    let product = NewSourceProduct {
        title,
        source_url,
        supplier_id,
        created_by: user_id,
        created_at: Utc::now(),
    };
    store.insert_product(session, product).await?;
    info!(%user_id, supplier_id, "source product created");
    Ok(Mutation::Applied)
}
