/*
 * Responsibility
 * - `/api` 配下 (edge guard の reserved prefix) の公開インターフェース
 */
pub mod v1;
