//! In-process stand-in for the hosted data and auth APIs that records every
//! request it receives.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use pricewatch::db::PostgrestStore;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;
use uuid::Uuid;

pub const ANON_KEY: &str = "anon";
pub const USER_TOKEN: &str = "user-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body was not JSON")
    }
}

#[derive(Clone)]
struct FakeState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    user_id: Uuid,
}

pub struct FakeHosted {
    pub url: Url,
    pub user_id: Uuid,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeHosted {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Requests for one path, in arrival order.
    pub fn to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn store(&self) -> PostgrestStore {
        PostgrestStore::new(http_client(), &self.url, ANON_KEY).expect("store")
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client")
}

pub async fn spawn_fake_hosted() -> FakeHosted {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let user_id = Uuid::new_v4();
    let state = FakeState {
        requests: requests.clone(),
        user_id,
    };
    let app = Router::new().fallback(respond).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server");
    });

    FakeHosted {
        url: Url::parse(&format!("http://{addr}/")).expect("url"),
        user_id,
        requests,
    }
}

async fn respond(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let query = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    state.requests.lock().expect("requests lock").push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query,
        headers,
        body,
    });

    if path == "/auth/v1/user" {
        return match bearer.as_deref() {
            Some(USER_TOKEN) => Json(json!({ "id": state.user_id, "aud": "authenticated" }))
                .into_response(),
            _ => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response(),
        };
    }

    let Some(table) = path.strip_prefix("/rest/v1/") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let is_user = match bearer.as_deref() {
        Some(USER_TOKEN) => true,
        Some(ANON_KEY) => false,
        _ => {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "JWT expired" })))
                .into_response();
        }
    };

    match (method.as_str(), table) {
        ("GET", "suppliers") => {
            Json(json!([{ "id": 1, "name": "Acme", "website": "https://acme.example" }]))
                .into_response()
        }
        ("GET", "account_suppliers") if is_user => {
            Json(json!([{ "supplier_id": 1 }])).into_response()
        }
        ("GET", "account_suppliers") => Json(json!([])).into_response(),
        ("GET", "source_products") => Json(json!([{
            "id": 7,
            "title": "Kettle",
            "source_url": "https://shop.example/kettle",
            "supplier_id": 1,
            "created_at": "2024-05-01T10:00:00.123456+00:00",
            "supplier": { "name": "Acme" }
        }]))
        .into_response(),
        ("GET", "scraped_offers") => Json(json!([])).into_response(),
        ("POST", _) => StatusCode::CREATED.into_response(),
        ("DELETE", _) => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
