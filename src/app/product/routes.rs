//! 产品路由

use axum::{routing::get, routing::post, Router};

use super::handler::{
    create_product, delete_product, get_product, get_products, update_product, AppState,
};

/// 注册产品资源的五条路由，未匹配的路径交给 axum 默认的 404
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/product", post(create_product))
        .route(
            "/product/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products", get(get_products))
        .with_state(state)
}
