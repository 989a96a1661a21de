use std::sync::{Mutex, MutexGuard, PoisonError};

use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::config::CookieNames;
use crate::services::session::SessionState;

#[derive(Debug, Default)]
struct SessionData {
    token: Option<String>,
    role: Option<String>,
    logged_out: bool,
}

/// Session state loaded from the request cookies.
///
/// `logout()` only drops the in-memory copy and records that it happened;
/// the view layer turns that into cookie removal plus a login redirect.
#[derive(Debug, Default)]
pub struct CookieSession {
    inner: Mutex<SessionData>,
}

impl CookieSession {
    pub fn from_jar(jar: &CookieJar, names: &CookieNames) -> Self {
        let read = |name: &str| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };

        Self::new(read(&names.token), read(&names.role))
    }

    pub fn new(token: Option<String>, role: Option<String>) -> Self {
        Self {
            inner: Mutex::new(SessionData {
                token,
                role,
                logged_out: false,
            }),
        }
    }

    pub fn is_logged_out(&self) -> bool {
        self.lock().logged_out
    }

    /// Expire both session cookies on the client.
    pub fn clear_cookies(jar: CookieJar, names: &CookieNames) -> CookieJar {
        jar.remove(Cookie::build((names.token.clone(), "")).path("/"))
            .remove(Cookie::build((names.role.clone(), "")).path("/"))
    }

    fn lock(&self) -> MutexGuard<'_, SessionData> {
        // Plain data with no invariants spanning a panic.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionState for CookieSession {
    fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    fn user_role(&self) -> Option<String> {
        self.lock().role.clone()
    }

    fn access_token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    fn logout(&self) {
        let mut data = self.lock();
        data.token = None;
        data.role = None;
        data.logged_out = true;
        tracing::info!("local session cleared");
    }
}
