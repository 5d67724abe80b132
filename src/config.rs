/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, 認可サーバの URL / timeout など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - core (Authenticator) には OAuthConfig として明示的に渡す
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::middleware::http::HttpPolicy;
use crate::services::oauth::OAuthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

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

// 全項目に default があるので「未設定」エラーは無い
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub oauth_base_url: Url,
    pub oauth_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let defaults = OAuthConfig::default();

        let oauth_base_url = match std::env::var("OAUTH_BASE_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.base_url,
        };

        let oauth_timeout = std::env::var("OAUTH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            addr,
            app_env,
            oauth_base_url,
            oauth_timeout,
        })
    }

    pub fn oauth(&self) -> OAuthConfig {
        OAuthConfig::new(self.oauth_base_url.clone(), self.oauth_timeout)
    }

    /// 全体 timeout は認可サーバの timeout より必ず長くする
    /// (認可サーバの timeout は 408 ではなく gate の 500 として返すため)
    pub fn http_policy(&self) -> HttpPolicy {
        HttpPolicy::default().covering(self.oauth_timeout)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("OAUTH_BASE_URL"))?;

    // path を後ろに足していくので base になれない URL (mailto: など) は不可
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid("OAUTH_BASE_URL"));
    }

    Ok(url)
}
