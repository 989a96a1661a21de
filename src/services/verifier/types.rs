/*
 * Responsibility
 * - verifier の入力 (VerifyOptions) と、view から見える状態 (VerifyStatus / AuthSnapshot)
 * - 画面遷移の出口 (Navigator) の契約
 */
use crate::services::profile::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    pub require_auth: bool,
    pub require_admin: bool,
    /// Replaces both the login and the dashboard fallback when set.
    pub redirect_to: Option<String>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            require_auth: true,
            require_admin: false,
            redirect_to: None,
        }
    }
}

impl VerifyOptions {
    pub fn admin() -> Self {
        Self {
            require_admin: true,
            ..Self::default()
        }
    }

    pub fn target_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.redirect_to.as_deref().unwrap_or(fallback)
    }
}

/// Live result of the most recent verification run.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyStatus {
    pub is_loading: bool,
    pub is_valid: bool,
    pub user: Option<UserProfile>,
}

impl Default for VerifyStatus {
    fn default() -> Self {
        Self {
            is_loading: true,
            is_valid: false,
            user: None,
        }
    }
}

/// `VerifyStatus` plus whatever the local session currently claims.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub status: VerifyStatus,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub role: Option<String>,
}

/// How a single `verify` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Redirected { to: String },
    /// The backend rejected the session (or was unreachable) and it was logged out.
    Revoked,
    Completed,
    /// A newer run started before this one resolved; its result was dropped.
    Superseded,
}

pub trait Navigator: Send + Sync {
    fn push(&self, target: &str);
}
