//! 服务配置
//!
//! 从环境变量（以及可选的 `application.env` 文件）构建配置，启动时显式传递给各层。

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;

/// 默认的环境文件
pub const ENV_FILE: &str = "application.env";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 服务配置
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// 日志级别 (trace, debug, info, warn, error)
    pub log_level: String,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 数据库配置
#[derive(Clone)]
pub struct DatabaseConfig {
    /// 设置了 `DATABASE_URL` 时直接使用
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

// 密码和 URL 不进入日志
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// 通过驱动的类型化构建器组装连接参数
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: "***".to_string(),
            });
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode).map_err(|_| ConfigError::Invalid {
            key: "DB_SSLMODE",
            value: self.ssl_mode.clone(),
        })?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .ssl_mode(ssl_mode);
        if !self.username.is_empty() {
            options = options.username(&self.username);
        }
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                username: String::new(),
                password: String::new(),
                name: "postgres".to_string(),
                ssl_mode: "disable".to_string(),
                max_connections: 20,
                min_connections: 5,
                acquire_timeout: Duration::from_secs(8),
            },
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 读取进程环境变量，调用前可先用 [`load_env_file`] 合并 `application.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，缺失的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server = ServerConfig {
            host: get("SERVER_HOST", &defaults.server.host),
            port: parse_or(&lookup, "SERVER_PORT", defaults.server.port)?,
        };

        let db = defaults.database;
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            host: get("DB_HOST", &db.host),
            port: parse_or(&lookup, "DB_PORT", db.port)?,
            username: get("DB_USERNAME", &db.username),
            password: get("DB_PASSWORD", &db.password),
            name: get("DB_NAME", &db.name),
            ssl_mode: get("DB_SSLMODE", &db.ssl_mode),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", db.max_connections)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", db.min_connections)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                db.acquire_timeout.as_secs(),
            )?),
        };

        Ok(Self {
            server,
            database,
            log_level: get("LOG_LEVEL", &defaults.log_level),
        })
    }
}

/// 将 `application.env` 合并进进程环境，已存在的变量不会被覆盖
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::from_filename(ENV_FILE).ok()
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
