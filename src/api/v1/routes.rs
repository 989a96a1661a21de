/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - `/api` は reserved prefix なので edge guard を素通りする
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::health::health;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
