/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::route_guard (edge guard), http (trace / request-id / limit / timeout), security_headers
 */
pub mod auth;
pub mod http;
pub mod security_headers;
