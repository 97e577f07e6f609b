/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, store backend, DB 接続, CORS, HTTP 制限, ログ形式)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - 解釈は lookup 関数越しに行う (テストでは env を触らない)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub store_backend: StoreBackend,
    pub database_url: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,

    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // empty values behave like unset ones
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port: u16 = parse_or(&get, "PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let store_backend = match get("STORE_BACKEND")
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("postgres") | Some("pg") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(_) => return Err(ConfigError::Invalid("STORE_BACKEND")),
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = get("DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let port: u16 = parse_or(&get, "DB_PORT", 5432)?;
                let user = get("DB_USERNAME").unwrap_or_else(|| "postgres".to_string());
                let password = get("DB_PASSWORD").unwrap_or_else(|| "postgres".to_string());
                let database = get("DB_DATABASE").unwrap_or_else(|| "bookmarks".to_string());
                format!("postgres://{user}:{password}@{host}:{port}/{database}")
            }
        };

        let db_max_connections: u32 = parse_or(&get, "DB_MAX_CONNECTIONS", 10)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid("DB_MAX_CONNECTIONS"));
        }

        let run_migrations = match get("RUN_MIGRATIONS")
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("true") | Some("1") | Some("yes") => true,
            Some("false") | Some("0") | Some("no") => false,
            Some(_) => return Err(ConfigError::Invalid("RUN_MIGRATIONS")),
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let timeout_seconds: u64 = parse_or(&get, "REQUEST_TIMEOUT_SECONDS", 30)?;
        if timeout_seconds == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }

        let body_limit_bytes: usize = parse_or(&get, "BODY_LIMIT_BYTES", 1024 * 1024)?;

        let log_format = match get("LOG_FORMAT").map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            addr,
            app_env,
            store_backend,
            database_url,
            db_max_connections,
            run_migrations,
            cors_allowed_origins,
            request_timeout: Duration::from_secs(timeout_seconds),
            body_limit_bytes,
            log_format,
        })
    }
}

fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
