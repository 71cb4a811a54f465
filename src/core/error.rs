//! 核心错误处理模块

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::response::ErrorBody;

/// 资源不存在时返回给客户端的消息
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// 存储层故障时返回给客户端的通用消息
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 存储层错误：连接、约束、超时等真正的失败
///
/// "没有匹配的行" 不属于此类，由数据访问层通过返回值表达。
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(#[from] pub sqlx::Error);

/// 请求处理错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("product not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(msg) => msg,
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::Store(e) => {
                // 驱动细节只进日志
                error!("Database error: {}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        // HashMap 迭代顺序不稳定
        messages.sort();

        ApiError::Validation(messages.join(", "))
    }
}
