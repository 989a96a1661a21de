//! cookie の有無だけで遷移を決める edge guard
//!
//! - token なし + protected → `/login?redirect=<path>`
//! - token あり + public (login) → `/dashboard`
//! - どこにも分類されない path → token があれば `/dashboard`、なければ `/login`
//! - それ以外はそのまま通す
//!
//! admin 限定の判定はしない（cookie では role を証明できない）。view 側の verifier が担当する。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use url::form_urlencoded;

use crate::services::route_table::{DASHBOARD_PATH, LOGIN_PATH, RouteClass, RouteTable};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { return_to: Option<String> },
    RedirectToDashboard,
}

/// Evaluate the guard rules. Pure; no I/O.
pub fn decide(routes: &RouteTable, path: &str, has_token: bool) -> GuardDecision {
    match (routes.classify(path), has_token) {
        (RouteClass::Protected, false) => GuardDecision::RedirectToLogin {
            return_to: Some(path.to_string()),
        },
        (RouteClass::Public, true) => GuardDecision::RedirectToDashboard,
        // Unknown route
        (RouteClass::Unclassified, true) => GuardDecision::RedirectToDashboard,
        (RouteClass::Unclassified, false) => GuardDecision::RedirectToLogin { return_to: None },
        (RouteClass::Public, false) | (RouteClass::Protected, true) | (RouteClass::Reserved, _) => {
            GuardDecision::Allow
        }
    }
}

/// `/login?redirect=%2Fadmin`
pub fn login_location(return_to: Option<&str>) -> String {
    match return_to {
        Some(path) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("redirect", path)
                .finish();
            format!("{LOGIN_PATH}?{query}")
        }
        None => LOGIN_PATH.to_string(),
    }
}

impl GuardDecision {
    /// `None` means let the request through.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin { return_to } => {
                Some(Redirect::temporary(&login_location(return_to.as_deref())))
            }
            GuardDecision::RedirectToDashboard => Some(Redirect::temporary(DASHBOARD_PATH)),
        }
    }
}

/// Router 全体 (fallback 含む) に edge guard を掛ける。
///
/// 例：
/// ```ignore
/// let app = middleware::auth::route_guard::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, route_guard_middleware))
}

async fn route_guard_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Response {
    let has_token = jar
        .get(&state.cookies.token)
        .is_some_and(|c| !c.value().is_empty());

    let path = req.uri().path();
    let decision = decide(&state.routes, path, has_token);

    tracing::debug!(
        path = %path,
        has_token,
        admin_only = state.routes.is_admin_only(path),
        decision = ?decision,
        "route guard"
    );

    match decision.redirect() {
        Some(redirect) => redirect.into_response(),
        None => next.run(req).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::{StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    use crate::config::CookieNames;
    use crate::services::profile::{ProfileApi, ProfileError, UserProfile};

    const PROTECTED: [&str; 6] = [
        "/dashboard",
        "/accounts",
        "/admin",
        "/feedback",
        "/stocks",
        "/settings",
    ];

    #[test]
    fn protected_without_token_goes_to_login_with_return_path() {
        let routes = RouteTable::default();
        for path in PROTECTED {
            assert_eq!(
                decide(&routes, path, false),
                GuardDecision::RedirectToLogin {
                    return_to: Some(path.to_string())
                }
            );
        }
    }

    #[test]
    fn protected_with_token_and_public_without_token_pass() {
        let routes = RouteTable::default();
        for path in PROTECTED {
            assert_eq!(decide(&routes, path, true), GuardDecision::Allow, "{path}");
        }
        assert_eq!(decide(&routes, "/login", false), GuardDecision::Allow);
    }

    #[test]
    fn public_with_token_goes_to_dashboard() {
        let routes = RouteTable::default();
        assert_eq!(decide(&routes, "/login", true), GuardDecision::RedirectToDashboard);
    }

    #[test]
    fn unknown_routes_bounce_by_token() {
        let routes = RouteTable::default();
        for path in ["/unknown-page", "/", "/reports/2024"] {
            assert_eq!(decide(&routes, path, true), GuardDecision::RedirectToDashboard);
            assert_eq!(
                decide(&routes, path, false),
                GuardDecision::RedirectToLogin { return_to: None }
            );
        }
    }

    #[test]
    fn reserved_prefixes_always_pass() {
        let routes = RouteTable::default();
        for path in ["/_next/data/x.json", "/api/v1/health", "/static/app.css", "/favicon.ico"] {
            assert_eq!(decide(&routes, path, true), GuardDecision::Allow, "{path}");
            assert_eq!(decide(&routes, path, false), GuardDecision::Allow, "{path}");
        }
    }

    #[test]
    fn login_location_encodes_return_path() {
        assert_eq!(login_location(Some("/admin")), "/login?redirect=%2Fadmin");
        assert_eq!(
            login_location(Some("/stocks/a b")),
            "/login?redirect=%2Fstocks%2Fa+b"
        );
        assert_eq!(login_location(None), "/login");
    }

    struct NoProfiles;

    #[async_trait]
    impl ProfileApi for NoProfiles {
        async fn fetch_me(&self, _token: Option<&str>) -> Result<UserProfile, ProfileError> {
            Err(ProfileError::Status(503))
        }
    }

    fn app() -> Router {
        let state = AppState::new(
            RouteTable::default(),
            Arc::new(NoProfiles),
            CookieNames::default(),
        );
        let router = Router::new()
            .route("/login", get(|| async { "login" }))
            .route("/admin", get(|| async { "admin" }))
            .fallback(|| async { "fallback" });

        apply(router, state.clone()).with_state(state)
    }

    async fn send(path: &str, cookie: Option<&str>) -> Response {
        let mut req = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn location(res: &Response) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn admin_without_cookie_redirects_to_login() {
        let res = send("/admin", None).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&res), "/login?redirect=%2Fadmin");
    }

    #[tokio::test]
    async fn login_with_cookie_redirects_to_dashboard() {
        let res = send("/login", Some("token=abc")).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&res), "/dashboard");
    }

    #[tokio::test]
    async fn unknown_page_redirects_by_cookie() {
        let res = send("/unknown-page", Some("token=abc")).await;
        assert_eq!(location(&res), "/dashboard");

        let res = send("/unknown-page", None).await;
        assert_eq!(location(&res), "/login");
    }

    #[tokio::test]
    async fn empty_cookie_value_is_no_token() {
        let res = send("/admin", Some("token=")).await;
        assert_eq!(location(&res), "/login?redirect=%2Fadmin");
    }

    #[tokio::test]
    async fn allowed_requests_reach_the_inner_router_unmodified() {
        let res = send("/admin", Some("token=abc")).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send("/login", None).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send("/api/anything", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"fallback");
    }
}
