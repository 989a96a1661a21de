//! Runs the `AuthVerifier` for a single view request.
//!
//! The local session is loaded from the request cookies, verified against the
//! backend, and the result is turned into either a redirect or the snapshot the
//! view renders from.

use std::sync::{Arc, Mutex, PoisonError};

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::services::route_table::LOGIN_PATH;
use crate::services::session::CookieSession;
use crate::services::verifier::{AuthSnapshot, AuthVerifier, Navigator, VerifyOptions};
use crate::state::AppState;

/// Navigator for server-rendered views: remembers the last pushed target.
#[derive(Debug, Default)]
pub struct RedirectRecorder {
    target: Mutex<Option<String>>,
}

impl RedirectRecorder {
    pub fn take(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for RedirectRecorder {
    fn push(&self, target: &str) {
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = Some(target.to_string());
    }
}

pub async fn verify_view(
    state: &AppState,
    jar: CookieJar,
    path: &str,
    options: VerifyOptions,
) -> Result<AuthSnapshot, Response> {
    let session = Arc::new(CookieSession::from_jar(&jar, &state.cookies));
    let navigator = Arc::new(RedirectRecorder::default());
    let verifier = AuthVerifier::new(session.clone(), state.profiles.clone(), navigator.clone());
    let status = verifier.subscribe();

    let outcome = verifier.verify(&options, path).await;
    tracing::debug!(path, outcome = ?outcome, "view verification");

    // logout 後の遷移は logout 側 (ここ) の責務: cookie を消して login へ
    if session.is_logged_out() {
        let jar = CookieSession::clear_cookies(jar, &state.cookies);
        return Err((jar, Redirect::temporary(LOGIN_PATH)).into_response());
    }

    if let Some(target) = navigator.take() {
        return Err(Redirect::temporary(&target).into_response());
    }

    if status.borrow().is_loading {
        tracing::error!(path, "verification finished without a decision");
        return Err(AppError::Internal.into_response());
    }

    Ok(verifier.snapshot())
}
