use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{Html, Response},
};

use super::after_mutation;
use crate::middleware::auth::CurrentSession;
use crate::router::AppState;
use crate::service::catalog::{create_product, load_catalog};
use crate::service::offers::{load_detail, seed_dummy_offers};
use crate::service::parse_id;
use crate::types::forms::CreateProductForm;
use crate::{AppError, views};

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, AppError> {
    let catalog = load_catalog(state.store.as_ref(), &session).await?;
    Ok(Html(views::products::render(&catalog)))
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    body: Bytes,
) -> Response {
    let form = CreateProductForm::from_urlencoded(&body);
    let outcome = create_product(state.store.as_ref(), &session, &form).await;
    after_mutation("create_product", outcome, "/products")
}

/// GET /products/{id}
pub async fn product_detail(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let product_id = parse_id(Some(&id)).ok_or(AppError::NotFound)?;
    let detail = load_detail(state.store.as_ref(), &session, product_id).await?;
    Ok(Html(views::product_detail::render(&detail)))
}

/// POST /products/{id}/seed-offers
pub async fn seed_offers(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Response {
    let product_id = parse_id(Some(&id));
    let outcome = seed_dummy_offers(state.store.as_ref(), &session, product_id).await;
    let back = match product_id {
        Some(product_id) => format!("/products/{product_id}"),
        None => "/products".to_string(),
    };
    after_mutation("seed_dummy_offers", outcome, &back)
}
