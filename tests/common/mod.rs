#![allow(dead_code)]

pub mod hosted;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use pricewatch::auth::{DevTokens, Session};
use pricewatch::db::{SqliteStore, Store};
use pricewatch::{AppState, app_router};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const TOKEN: &str = "alice-token";

pub struct TestApp {
    pub app: Router,
    pub store: SqliteStore,
    pub user_id: Uuid,
}

/// Router over a fresh in-memory SQLite store with one known access token.
pub async fn spawn_app() -> TestApp {
    let store = SqliteStore::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    let user_id = Uuid::new_v4();
    let auth = DevTokens::new(HashMap::from([(TOKEN.to_string(), user_id)]));
    let state = AppState::new(Arc::new(store.clone()), Arc::new(auth));
    TestApp {
        app: app_router(state),
        store,
        user_id,
    }
}

impl TestApp {
    pub fn session(&self) -> Session {
        Session::new(Some(TOKEN.to_string()), Some(self.user_id))
    }

    pub async fn add_supplier(&self, name: &str, website: Option<&str>) -> i64 {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO suppliers (name, website) VALUES (?, ?) RETURNING id")
                .bind(name)
                .bind(website)
                .fetch_one(self.store.pool())
                .await
                .expect("insert supplier");
        id
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            req = req.header("authorization", format!("Bearer {token}"));
        }
        self.app
            .clone()
            .oneshot(req.body(Body::empty()).expect("failed to build request"))
            .await
            .expect("request failed")
    }

    pub async fn post_form(&self, uri: &str, form: &str, token: Option<&str>) -> Response<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(token) = token {
            req = req.header("authorization", format!("Bearer {token}"));
        }
        self.app
            .clone()
            .oneshot(
                req.body(Body::from(form.to_string()))
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed")
    }

    /// POST without a content type, as a hand-rolled client might send it.
    pub async fn post_raw(&self, uri: &str, body: &str, token: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().method("POST").uri(uri);
        if let Some(token) = token {
            req = req.header("authorization", format!("Bearer {token}"));
        }
        self.app
            .clone()
            .oneshot(
                req.body(Body::from(body.to_string()))
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed")
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(sql)
            .fetch_one(self.store.pool())
            .await
            .expect("count query");
        n
    }

    pub async fn enabled_ids(&self) -> std::collections::HashSet<i64> {
        self.store
            .enabled_supplier_ids(&self.session(), self.user_id)
            .await
            .expect("enabled ids")
    }
}

pub fn assert_redirect(resp: &Response<Body>, location: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

pub async fn body_text(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}
