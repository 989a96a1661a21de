/*
 * Responsibility
 * - view の URL 構造を RouteTable から組み立てる
 * - admin 限定 prefix は admin_view、それ以外の protected prefix は protected_view
 * - 末尾 '/' と sub-path も同じ view に流す (edge guard は prefix 一致で通すため)
 */
use axum::{Router, routing::get};

use crate::pages::handlers::{
    login::login,
    views::{admin_view, protected_view},
};
use crate::services::route_table::{LOGIN_PATH, RouteTable};
use crate::state::AppState;

pub fn routes(table: &RouteTable) -> Router<AppState> {
    let mut router = Router::new()
        .route(LOGIN_PATH, get(login))
        .route(&format!("{LOGIN_PATH}/"), get(login))
        .route(&format!("{LOGIN_PATH}/{{*rest}}"), get(login));

    for prefix in table.protected_prefixes() {
        let view = if table.is_admin_only(prefix) {
            get(admin_view)
        } else {
            get(protected_view)
        };

        router = router
            .route(prefix, view.clone())
            .route(&format!("{prefix}/"), view.clone())
            .route(&format!("{prefix}/{{*rest}}"), view);
    }

    router
}
