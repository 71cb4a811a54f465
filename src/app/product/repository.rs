//! 产品数据访问层
//!
//! 所有语句都使用参数绑定；连接生命周期由调用方传入的连接池管理。

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use super::model::{Product, ProductInput};
use crate::core::error::StoreError;

/// 未指定 `count` 时的默认页大小
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// 单页最多返回的行数
pub const MAX_PAGE_SIZE: i64 = 100;

/// 键集分页参数：返回 `id > start` 的前 `count` 行，按 id 升序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    start: i64,
    count: i64,
}

impl PageRequest {
    /// `start` 负数按 0 处理；`count` 被限制在 `1..=MAX_PAGE_SIZE`
    pub fn new(start: i64, count: i64) -> Self {
        Self {
            start: start.max(0),
            count: count.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// 删除结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// 产品存储接口
///
/// 找不到记录通过 `None` / [`DeleteOutcome::NotFound`] 表达，`Err` 只用于存储故障。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, StoreError>;

    async fn get_range(&self, page: PageRequest) -> Result<Vec<Product>, StoreError>;

    async fn create(&self, input: &ProductInput) -> Result<Product, StoreError>;

    async fn update(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, StoreError>;

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, StoreError>;
}

/// PostgreSQL 实现
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(product)
    }

    async fn get_range(&self, page: PageRequest) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products WHERE id > $1 ORDER BY id ASC LIMIT $2",
        )
        .bind(page.start())
        .bind(page.count())
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price",
        )
        .bind(&input.name)
        .bind(input.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $1, price = $2 WHERE id = $3 RETURNING id, name, price",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn delete(&self, id: i32) -> Result<DeleteOutcome, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}
