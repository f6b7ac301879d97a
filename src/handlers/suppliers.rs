use axum::{
    body::Bytes,
    extract::State,
    response::{Html, Response},
};

use super::after_mutation;
use crate::middleware::auth::CurrentSession;
use crate::router::AppState;
use crate::service::suppliers::{load_directory, toggle_supplier};
use crate::types::forms::ToggleSupplierForm;
use crate::{AppError, views};

/// GET /suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, AppError> {
    let directory = load_directory(state.store.as_ref(), &session).await?;
    Ok(Html(views::suppliers::render(&directory)))
}

/// POST /suppliers/toggle
pub async fn toggle(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    body: Bytes,
) -> Response {
    let form = ToggleSupplierForm::from_urlencoded(&body);
    let outcome = toggle_supplier(state.store.as_ref(), &session, &form).await;
    after_mutation("toggle_supplier", outcome, "/suppliers")
}
