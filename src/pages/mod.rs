/*
 * Responsibility
 * - ブラウザに返す view (login / protected / admin)
 * - protected / admin view は描画前に verifier を通す
 */
pub mod handlers;
mod routes;
pub mod view_auth;

pub use routes::routes;
