use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::Authenticator;
use crate::db::UserId;
use crate::error::AppError;

/// Asks the hosted auth API who owns a token (`GET /auth/v1/user`).
pub struct SupabaseAuth {
    client: reqwest::Client,
    user_url: Url,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
}

impl SupabaseAuth {
    pub fn new(
        client: reqwest::Client,
        project_url: &Url,
        anon_key: impl Into<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client,
            user_url: project_url.join("auth/v1/user")?,
            anon_key: anon_key.into(),
        })
    }
}

#[async_trait]
impl Authenticator for SupabaseAuth {
    async fn resolve(&self, access_token: &str) -> Result<Option<UserId>, AppError> {
        let resp = self
            .client
            .get(self.user_url.clone())
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("auth API rejected access token");
                Ok(None)
            }
            status if status.is_success() => {
                let user: AuthUser = resp.json().await?;
                Ok(Some(user.id))
            }
            status => Err(AppError::UpstreamStatus(status)),
        }
    }
}
