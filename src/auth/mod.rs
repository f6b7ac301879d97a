//! Identity resolution: turn a request's access token into a user id.

pub mod supabase;

use async_trait::async_trait;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

use crate::db::UserId;
use crate::error::AppError;
pub use supabase::SupabaseAuth;

/// Who is asking, as far as this request can tell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    access_token: Option<String>,
    user_id: Option<UserId>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(access_token: Option<String>, user_id: Option<UserId>) -> Self {
        Self {
            access_token,
            user_id,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }
}

/// Resolves an access token to the user it was issued to.
/// `Ok(None)` means the token is unknown, expired or revoked.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn resolve(&self, access_token: &str) -> Result<Option<UserId>, AppError>;
}

/// Fixed token table for the local SQLite backend.
pub struct DevTokens {
    tokens: Vec<(String, UserId)>,
}

impl DevTokens {
    pub fn new(tokens: HashMap<String, UserId>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Authenticator for DevTokens {
    async fn resolve(&self, access_token: &str) -> Result<Option<UserId>, AppError> {
        let found = self
            .tokens
            .iter()
            .find(|(token, _)| bool::from(token.as_bytes().ct_eq(access_token.as_bytes())))
            .map(|(_, user)| *user);
        Ok(found)
    }
}
