/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (edge guard / security headers / http)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{Router, extract::OriginalUri};
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::services::{profile::HttpProfileApi, route_table::RouteTable};
use crate::state::AppState;
use crate::{api, middleware, pages};

// Headroom over the profile check so a slow backend surfaces as a failed check, not a 408.
const REQUEST_TIMEOUT_HEADROOM: Duration = Duration::from_secs(5);

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,route_guard=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development では即座に落として気づけるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting route guard in {:?} mode on {} (api: {})",
        config.app_env,
        config.addr,
        config.api_base_url
    );

    let profiles = HttpProfileApi::new(&config.api_base_url, config.profile_timeout)?;
    let state = AppState::new(
        RouteTable::default(),
        Arc::new(profiles),
        config.cookies.clone(),
    );

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(pages::routes(&state.routes))
        .nest("/api/v1", api::v1::routes())
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(not_found);

    // edge guard は fallback も含めて全 route の手前で判定する
    let router = middleware::auth::route_guard::apply(router, state.clone()).with_state(state);
    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router, config.profile_timeout + REQUEST_TIMEOUT_HEADROOM)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found(uri.path())
}
