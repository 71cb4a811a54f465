//! 数据库基础设施

use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig};

/// `products` 表结构，id 由数据库序列生成
pub const PRODUCTS_TABLE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL,
        name TEXT NOT NULL,
        price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
        CONSTRAINT products_pkey PRIMARY KEY (id)
    )
"#;

/// 连接池启动错误
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to connect to database: {0}")]
    Connect(#[from] Error),
}

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = config.connect_options()?;

        info!(
            host = %config.host,
            database = %config.name,
            max_connections = config.max_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}

/// 创建 `products` 表（如果不存在）
pub async fn ensure_schema(pool: &PgPool) -> Result<(), Error> {
    sqlx::query(PRODUCTS_TABLE_DDL).execute(pool).await?;
    info!("Table products is ready");
    Ok(())
}
