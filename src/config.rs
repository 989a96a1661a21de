/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, API_BASE_URL, cookie 名など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - 読み込み元は lookup 関数で差し替え可能 (テストは HashMap から渡す)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Cookie names the edge guard and the views read the local session from.
#[derive(Clone, Debug)]
pub struct CookieNames {
    pub token: String,
    pub role: String,
}

impl Default for CookieNames {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            role: "role".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Backend exposing `GET /auth/users/me`
    pub api_base_url: Url,
    pub profile_timeout: Duration,

    pub cookies: CookieNames,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(&get("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let api_base_url = get("API_BASE_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let api_base_url = Url::parse(api_base_url.trim())
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or(ConfigError::Invalid("API_BASE_URL"))?;

        let profile_timeout_seconds: u64 = match get("PROFILE_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid("PROFILE_TIMEOUT_SECONDS"))?,
            None => 10,
        };

        let defaults = CookieNames::default();
        let cookies = CookieNames {
            token: non_empty(&get, "SESSION_COOKIE")?.unwrap_or(defaults.token),
            role: non_empty(&get, "ROLE_COOKIE")?.unwrap_or(defaults.role),
        };

        let static_dir = get("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        Ok(Self {
            addr,
            app_env,
            api_base_url,
            profile_timeout: Duration::from_secs(profile_timeout_seconds),
            cookies,
            static_dir,
        })
    }
}

// An explicitly empty cookie name would never match, so reject it.
fn non_empty(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    match get(key) {
        Some(v) if v.trim().is_empty() => Err(ConfigError::Invalid(key)),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}
