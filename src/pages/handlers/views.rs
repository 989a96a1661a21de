/*
 * Responsibility
 * - protected view (/dashboard, /accounts, ...) と admin view (/admin)
 * - 描画前に verifier で backend 確認を通す
 */
use axum::{
    Json,
    extract::{OriginalUri, State},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::pages::view_auth::verify_view;
use crate::services::profile::UserProfile;
use crate::services::verifier::{AuthSnapshot, VerifyOptions};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ViewBody {
    pub view: String,
    pub path: String,
    pub user: Option<UserProfile>,
    pub role: Option<String>,
    pub is_authenticated: bool,
    pub is_admin: bool,
}

impl ViewBody {
    fn new(path: &str, snapshot: AuthSnapshot) -> Self {
        Self {
            view: view_name(path).to_string(),
            path: path.to_string(),
            user: snapshot.status.user,
            role: snapshot.role,
            is_authenticated: snapshot.is_authenticated,
            is_admin: snapshot.is_admin,
        }
    }
}

// "/stocks/AAPL" -> "stocks"
fn view_name(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or_default()
}

pub async fn protected_view(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
) -> Result<Json<ViewBody>, Response> {
    render(&state, jar, uri.path(), VerifyOptions::default()).await
}

pub async fn admin_view(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
) -> Result<Json<ViewBody>, Response> {
    render(&state, jar, uri.path(), VerifyOptions::admin()).await
}

async fn render(
    state: &AppState,
    jar: CookieJar,
    path: &str,
    options: VerifyOptions,
) -> Result<Json<ViewBody>, Response> {
    let snapshot = verify_view(state, jar, path, options).await?;
    Ok(Json(ViewBody::new(path, snapshot)))
}
