pub mod products;
pub mod suppliers;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::service::Mutation;
use crate::views;

/// Every form submission ends the same way: log what happened, then send the
/// browser back to `to` so the view is fetched again.
fn after_mutation(action: &str, outcome: Result<Mutation, AppError>, to: &str) -> Response {
    match outcome {
        Ok(Mutation::Applied) => {}
        Ok(Mutation::Skipped(reason)) => debug!(action, %reason, "mutation skipped"),
        Err(e) => warn!(action, error = %e, "mutation failed"),
    }
    Redirect::to(to).into_response()
}

pub async fn index() -> Redirect {
    Redirect::to("/suppliers")
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(views::error_page(StatusCode::NOT_FOUND, "There is no page at this address.")),
    )
}
