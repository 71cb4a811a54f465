//! 产品资源：模型、数据访问、处理器与路由

pub mod handler;
pub mod model;
pub mod repository;
pub mod routes;


pub use handler::AppState;
pub use model::{Product, ProductInput};
pub use repository::{DeleteOutcome, PageRequest, PgProductRepository, ProductRepository};
pub use routes::routes;
