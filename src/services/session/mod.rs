/*
 * Responsibility
 * - ローカルに保持された認証状態 (token / role) への唯一のアクセサ
 * - 読み取りは同期 (is_authenticated / is_admin / user_role)
 * - logout() で破棄する。生成はリクエスト cookie からの読み込み時
 */
mod cookie;

pub use cookie::CookieSession;

/// Roles that unlock admin-only views. Comparison is exact.
pub const PRIVILEGED_ROLES: &[&str] = &["admin", "superadmin"];

pub fn is_privileged_role(role: &str) -> bool {
    PRIVILEGED_ROLES.contains(&role)
}

/// Locally cached auth state. Asserts identity, never proves it.
pub trait SessionState: Send + Sync {
    fn is_authenticated(&self) -> bool;

    fn user_role(&self) -> Option<String>;

    /// Credential forwarded to the backend when the profile is re-checked.
    fn access_token(&self) -> Option<String>;

    fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user_role().is_some_and(|r| is_privileged_role(&r))
    }

    fn logout(&self);
}
