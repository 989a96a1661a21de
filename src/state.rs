/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - routes: RouteTable, profiles: ProfileApi, cookies: cookie 名
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::CookieNames;
use crate::services::{profile::ProfileApi, route_table::RouteTable};

#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub profiles: Arc<dyn ProfileApi>,
    pub cookies: CookieNames,
}

impl AppState {
    pub fn new(routes: RouteTable, profiles: Arc<dyn ProfileApi>, cookies: CookieNames) -> Self {
        Self {
            routes: Arc::new(routes),
            profiles,
            cookies,
        }
    }
}
