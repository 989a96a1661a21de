/*
 * Responsibility
 * - GET /api/v1/health (疎通用)
 * - token の有無に関係なく edge guard を通ることの確認用
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
