use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;
use uuid::Uuid;

/// Which store the application talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local SQLite database with the bundled schema.
    #[default]
    Sqlite,
    /// Hosted project: PostgREST data API plus the auth API.
    Supabase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub loglevel: String,
    pub backend: Backend,
    pub database_url: String,
    pub supabase_url: Option<Url>,
    pub supabase_anon_key: Option<String>,
    /// Cookie carrying the raw access token when no bearer header is sent.
    pub session_cookie: String,
    /// Static access tokens for the SQLite backend: token -> user id.
    pub dev_tokens: HashMap<String, Uuid>,
    pub proxy: Option<Url>,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            backend: Backend::default(),
            database_url: "sqlite:pricewatch.sqlite".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            session_cookie: "sb-access-token".to_string(),
            dev_tokens: HashMap::new(),
            proxy: None,
            request_timeout_secs: 15,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `PRICEWATCH_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PRICEWATCH_"))
            .extract()
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| panic!("FATAL: invalid configuration: {e}"))
});
