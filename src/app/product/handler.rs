//! 产品处理器
//!
//! 每个处理器都是一条线性流程：解析 → 校验 → 调用数据访问层 → 生成响应。

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use super::{
    model::{Product, ProductInput},
    repository::{DeleteOutcome, PageRequest, ProductRepository, DEFAULT_PAGE_SIZE},
};
use crate::core::{error::ApiError, response::ResultBody};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

/// `GET /products` 的查询参数，按字符串接收后宽松解析
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub start: Option<String>,
    pub count: Option<String>,
}

impl ListProductsQuery {
    /// 缺失或无法解析的值使用默认值，随后由 [`PageRequest::new`] 限制范围
    pub fn page(&self) -> PageRequest {
        let parse = |value: &Option<String>, default: i64| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };
        PageRequest::new(parse(&self.start, 0), parse(&self.count, DEFAULT_PAGE_SIZE))
    }
}

/// 路径中的 id 必须是纯数字组成的正整数，不接受符号和空白
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i32, ApiError> {
    let Path(raw) = path?;
    let invalid = || ApiError::Validation("Invalid product ID".to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}

fn parse_body(payload: Result<Json<ProductInput>, JsonRejection>) -> Result<ProductInput, ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    Ok(input)
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let input = parse_body(payload)?;
    let product = state.products.create(&input).await?;

    info!("Created product: {} ({})", product.name, product.id);

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(path)?;
    let product = state
        .products
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(product))
}

pub async fn get_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let page = match query {
        Ok(Query(query)) => query.page(),
        Err(rejection) => {
            debug!("Ignoring malformed query string: {}", rejection.body_text());
            PageRequest::default()
        }
    };
    let products = state.products.get_range(page).await?;

    Ok(Json(products))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let id = parse_id(path)?;
    let input = parse_body(payload)?;
    let product = state
        .products
        .update(id, &input)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!("Updated product: {} ({})", product.name, product.id);

    Ok((StatusCode::ACCEPTED, Json(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ResultBody>, ApiError> {
    let id = parse_id(path)?;
    match state.products.delete(id).await? {
        DeleteOutcome::Deleted => {
            info!("Deleted product: {}", id);
            Ok(Json(ResultBody::success()))
        }
        DeleteOutcome::NotFound => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: Option<&str>, count: Option<&str>) -> ListProductsQuery {
        ListProductsQuery {
            start: start.map(str::to_string),
            count: count.map(str::to_string),
        }
    }

    #[test]
    fn test_query_defaults() {
        assert_eq!(query(None, None).page(), PageRequest::default());
        assert_eq!(query(Some("abc"), Some("")).page(), PageRequest::default());
    }

    #[test]
    fn test_query_is_clamped() {
        let page = query(Some("-3"), Some("0")).page();
        assert_eq!(page.start(), 0);
        assert_eq!(page.count(), 1);

        let page = query(Some("1"), Some("2")).page();
        assert_eq!(page.start(), 1);
        assert_eq!(page.count(), 2);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Ok(Path("12".to_string()))).unwrap(), 12);
        assert!(matches!(
            parse_id(Ok(Path("0".to_string()))),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_id(Ok(Path("-4".to_string()))),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_id(Ok(Path("abc".to_string()))),
            Err(ApiError::Validation(_))
        ));
        for raw in ["+5", " 5", "5 ", "", "2147483648"] {
            assert!(
                matches!(parse_id(Ok(Path(raw.to_string()))), Err(ApiError::Validation(_))),
                "raw: {:?}",
                raw
            );
        }
    }
}
