use std::collections::HashSet;

use tracing::info;

use super::{Mutation, SkipReason, parse_id};
use crate::auth::Session;
use crate::db::{Store, Supplier};
use crate::error::AppError;
use crate::types::forms::ToggleSupplierForm;

pub struct SupplierDirectory {
    pub suppliers: Vec<Supplier>,
    pub enabled: HashSet<i64>,
}

/// Suppliers by name plus the caller's enabled set, fetched concurrently.
pub async fn load_directory(
    store: &dyn Store,
    session: &Session,
) -> Result<SupplierDirectory, AppError> {
    let enabled = async {
        match session.user_id() {
            Some(user_id) => store.enabled_supplier_ids(session, user_id).await,
            None => Ok(HashSet::new()),
        }
    };
    let (suppliers, enabled) = tokio::try_join!(store.list_suppliers(session), enabled)?;
    Ok(SupplierDirectory { suppliers, enabled })
}

/// Enable upserts the mapping row, disable deletes it.
pub async fn toggle_supplier(
    store: &dyn Store,
    session: &Session,
    form: &ToggleSupplierForm,
) -> Result<Mutation, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(Mutation::Skipped(SkipReason::Unauthenticated));
    };
    let Some(supplier_id) = parse_id(form.supplier_id.as_deref()) else {
        return Ok(Mutation::Skipped(SkipReason::InvalidInput("supplier_id")));
    };

    if form.wants_enabled() {
        store.enable_supplier(session, user_id, supplier_id).await?;
    } else {
        store.disable_supplier(session, user_id, supplier_id).await?;
    }
    info!(%user_id, supplier_id, enabled = form.wants_enabled(), "supplier toggled");
    Ok(Mutation::Applied)
}
