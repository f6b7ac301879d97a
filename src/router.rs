use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tracing::info;

use crate::auth::{Authenticator, DevTokens, SupabaseAuth};
use crate::config::{Backend, Config};
use crate::db::{PostgrestStore, SqliteStore, Store};
use crate::error::AppError;
use crate::handlers;

/// Shared, read-only per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: Arc<dyn Authenticator>,
    pub session_cookie: Arc<str>,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, auth: Arc<dyn Authenticator>) -> Self {
        let defaults = Config::default();
        Self {
            store,
            auth,
            session_cookie: Arc::from(defaults.session_cookie),
            body_limit: defaults.body_limit_bytes,
        }
    }

    pub fn with_session_cookie(mut self, name: impl Into<Arc<str>>) -> Self {
        self.session_cookie = name.into();
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Wire the configured backend: a local SQLite file with static dev
    /// tokens, or the hosted data and auth APIs.
    pub async fn from_config(cfg: &Config) -> Result<Self, AppError> {
        let (store, auth): (Arc<dyn Store>, Arc<dyn Authenticator>) = match cfg.backend {
            Backend::Sqlite => {
                let store = SqliteStore::connect(&cfg.database_url).await?;
                info!(
                    database_url = %cfg.database_url,
                    dev_tokens = cfg.dev_tokens.len(),
                    "using local SQLite store"
                );
                (
                    Arc::new(store),
                    Arc::new(DevTokens::new(cfg.dev_tokens.clone())),
                )
            }
            Backend::Supabase => {
                let project_url = cfg
                    .supabase_url
                    .as_ref()
                    .ok_or_else(|| AppError::Config("`supabase_url` is required".to_string()))?;
                let anon_key = cfg.supabase_anon_key.clone().ok_or_else(|| {
                    AppError::Config("`supabase_anon_key` is required".to_string())
                })?;
                let client = build_http_client(cfg)?;
                info!(project = %project_url, "using hosted data API");
                (
                    Arc::new(PostgrestStore::new(client.clone(), project_url, anon_key.clone())?),
                    Arc::new(SupabaseAuth::new(client, project_url, anon_key)?),
                )
            }
        };

        Ok(Self::new(store, auth)
            .with_session_cookie(cfg.session_cookie.as_str())
            .with_body_limit(cfg.body_limit_bytes))
    }
}

fn build_http_client(cfg: &Config) -> Result<reqwest::Client, AppError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("pricewatch/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(cfg.request_timeout_secs));
    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}

pub fn app_router(state: AppState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/suppliers", get(handlers::suppliers::list_suppliers))
        .route("/suppliers/toggle", post(handlers::suppliers::toggle))
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create),
        )
        .route("/products/{id}", get(handlers::products::product_detail))
        .route(
            "/products/{id}/seed-offers",
            post(handlers::products::seed_offers),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
