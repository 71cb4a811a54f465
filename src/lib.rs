//! # 产品资源服务
//!
//! 一个基于 Axum + SQLx 的小型 HTTP 服务，对单表 `products` 提供 CRUD 操作：
//! - `app`：产品模型、数据访问层、处理器与路由
//! - `core`：错误到状态码的映射、请求日志中间件、响应结构
//! - `infrastructure`：数据库连接池与日志初始化
//! - `config`：环境变量配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::product::{AppState, PgProductRepository, Product, ProductRepository};
pub use config::Config;
pub use crate::core::error::{ApiError, StoreError};
