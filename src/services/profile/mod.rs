//! "Who am I" lookups against the backend.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;

pub use self::http::HttpProfileApi;

use crate::services::session::is_privileged_role;

/// Profile returned by `GET /auth/users/me`.
///
/// Only `role` is interpreted; every other field is carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_privileged(&self) -> bool {
        self.role.as_deref().is_some_and(is_privileged_role)
    }
}

/// Failure to build a profile client; raised once at startup.
#[derive(Debug, Error)]
pub enum ProfileClientError {
    #[error("http client error: {0}")]
    Client(String),
    #[error("invalid api base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Every variant means the same thing to callers: the session is not valid.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile request failed: {0}")]
    Request(String),
    #[error("profile request rejected with status {0}")]
    Status(u16),
    #[error("profile response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ProfileApi: Send + Sync + 'static {
    async fn fetch_me(&self, access_token: Option<&str>) -> Result<UserProfile, ProfileError>;
}
