use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::services::profile::ProfileApi;
use crate::services::route_table::{DASHBOARD_PATH, LOGIN_PATH};
use crate::services::session::SessionState;
use crate::services::verifier::types::{
    AuthSnapshot, Navigator, VerifyOptions, VerifyOutcome, VerifyStatus,
};

/// Re-checks the local session against the backend before a view renders.
///
/// Call `verify` again whenever the options or the current path change. Every
/// call takes a new generation; a call that resolves after a newer one started
/// leaves the status, the session, and the navigator untouched.
pub struct AuthVerifier {
    session: Arc<dyn SessionState>,
    profiles: Arc<dyn ProfileApi>,
    navigator: Arc<dyn Navigator>,
    status: watch::Sender<VerifyStatus>,
    generation: AtomicU64,
}

impl AuthVerifier {
    pub fn new(
        session: Arc<dyn SessionState>,
        profiles: Arc<dyn ProfileApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (status, _) = watch::channel(VerifyStatus::default());
        Self {
            session,
            profiles,
            navigator,
            status,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<VerifyStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> VerifyStatus {
        self.status.borrow().clone()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            status: self.status(),
            is_authenticated: self.session.is_authenticated(),
            is_admin: self.session.is_admin(),
            role: self.session.user_role(),
        }
    }

    pub async fn verify(&self, options: &VerifyOptions, path: &str) -> VerifyOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if options.require_auth && !self.session.is_authenticated() {
            return self.redirect(options.target_or(LOGIN_PATH), path, "not authenticated");
        }

        if options.require_admin && !self.session.is_admin() {
            return self.redirect(options.target_or(DASHBOARD_PATH), path, "not admin");
        }

        if options.require_auth {
            let token = self.session.access_token();
            let fetched = self.profiles.fetch_me(token.as_deref()).await;

            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(path, generation, "dropping superseded verification");
                return VerifyOutcome::Superseded;
            }

            match fetched {
                Ok(profile) => {
                    let privileged = profile.is_privileged();
                    let role_ok = !options.require_admin || privileged;

                    self.status.send_modify(|s| {
                        s.user = Some(profile);
                        if role_ok {
                            s.is_valid = true;
                        }
                    });

                    if !role_ok {
                        return self.redirect(
                            options.target_or(DASHBOARD_PATH),
                            path,
                            "backend reports non-admin role",
                        );
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, path, "authentication verification failed");
                    self.status.send_modify(|s| s.is_valid = false);
                    self.session.logout();
                    return VerifyOutcome::Revoked;
                }
            }
        }

        self.status.send_modify(|s| s.is_loading = false);
        VerifyOutcome::Completed
    }

    fn redirect(&self, target: &str, path: &str, reason: &'static str) -> VerifyOutcome {
        tracing::info!(path, target, reason, "redirecting view");
        self.navigator.push(target);
        VerifyOutcome::Redirected {
            to: target.to_string(),
        }
    }
}
