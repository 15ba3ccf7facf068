use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};

#[derive(Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub log_filter: String,
}

#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    /// `None` 이면 sqlx 기본값을 사용한다. in-memory SQLite 는 커넥션이 닫히면 데이터가 사라진다.
    pub idle_timeout: Option<Duration>,
    pub sqlx_logging: bool,
}

impl DatabaseSettings {
    pub fn in_memory_sqlite() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(8),
            idle_timeout: None,
            sqlx_logging: false,
        }
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// `.env` 를 먼저 읽은 뒤 프로세스 환경 변수로 설정을 구성한다.
pub fn get_configuration() -> anyhow::Result<Settings> {
    dotenv::dotenv().ok();
    Settings::from_lookup(|key| env::var(key).ok())
}

impl Settings {
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let connect_timeout_secs: u64 = parse_or(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 8)?;

        let database = DatabaseSettings {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 5)?,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            idle_timeout: Some(Duration::from_secs(connect_timeout_secs)),
            sqlx_logging: parse_or(&lookup, "DATABASE_SQLX_LOGGING", true)?,
        };

        if database.min_connections > database.max_connections {
            return Err(anyhow!(
                "DATABASE_MIN_CONNECTIONS ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                database.min_connections,
                database.max_connections
            ));
        }

        let application = ApplicationSettings {
            host: lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "APP_PORT", 8080)?,
        };

        let log_filter = lookup("LOG_FILTER").unwrap_or_else(|| "info,sqlx=warn".to_string());

        Ok(Self {
            application,
            database,
            log_filter,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
