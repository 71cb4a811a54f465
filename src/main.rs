//! 产品服务启动入口

use axum::{middleware, Router};
use product_api::{
    app::product::{routes, AppState, PgProductRepository},
    config::{self, Config},
    core::middleware::request_logging_middleware,
    infrastructure::{
        database::{ensure_schema, DatabaseManager},
        logger::Logger,
    },
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file = config::load_env_file();
    let config = Config::from_env()?;

    Logger::init(&config.log_level);
    match env_file {
        Some(path) => info!("Loaded environment from {}", path.display()),
        None => warn!("No {} file found, using process environment", config::ENV_FILE),
    }

    info!("Server is starting");

    let db = DatabaseManager::new(&config.database).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        e
    })?;
    ensure_schema(db.get_pool()).await?;

    let state = AppState::new(Arc::new(PgProductRepository::new(db.into_pool())));
    let app = build_app(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// 在产品路由外层挂载追踪与请求日志
fn build_app(state: AppState) -> Router {
    routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_logging_middleware)),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
