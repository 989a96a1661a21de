/*!
 * Session re-verification for protected views
 *
 * Responsibility:
 * - ローカルの認証状態を信用せず、backend (`GET /auth/users/me`) で再確認する
 * - admin 限定 view の role チェックはここで行う (edge guard は cookie の有無しか見ない)
 * - 失敗時は session を破棄するだけで、遷移は logout 側の責務
 *
 * Public API:
 * - AuthVerifier
 * - VerifyOptions / VerifyStatus / AuthSnapshot / VerifyOutcome
 * - Navigator
 */

mod core;
mod types;

pub use self::core::AuthVerifier;
pub use types::{AuthSnapshot, Navigator, VerifyOptions, VerifyOutcome, VerifyStatus};
