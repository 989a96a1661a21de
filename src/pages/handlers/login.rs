/*
 * Responsibility
 * - GET /login (public)
 * - edge guard が付けた `redirect` を、ログイン後の戻り先として返す
 */
use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub view: &'static str,
    pub redirect: Option<String>,
}

pub async fn login(Query(query): Query<LoginQuery>) -> Json<LoginView> {
    Json(LoginView {
        view: "login",
        redirect: query.redirect.filter(|r| is_local_path(r)),
    })
}

// Only same-origin paths; `//host` and absolute URLs would be an open redirect.
// Browsers strip tab/newline from URLs, so "/\t/host" ends up as "//host".
fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(|c| c.is_ascii_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_local_return_targets_survive() {
        assert!(is_local_path("/admin"));
        assert!(is_local_path("/stocks/AAPL"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
        assert!(!is_local_path("/\t/evil.example"));
        assert!(!is_local_path("/\n/evil.example"));
        assert!(!is_local_path("/\r\n/evil.example"));
    }
}
