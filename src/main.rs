use std::net::SocketAddr;

use todo_server::application::todo_service::TodoServiceImpl;
use todo_server::config::Config;
use todo_server::http::routing::{self, todos};
use todo_server::infrastructure::sqlite_repo::SqliteTodoRepository;
use todo_server::notify::notifier_from_config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_args();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let repo = SqliteTodoRepository::open(&config.database_path).await?;
    let service = TodoServiceImpl::new(repo, notifier_from_config(&config));
    let todos_router = todos::router(todos::AppState { service });
    let router = routing::app(todos_router, routing::cors_layer(&config.allowed_origin)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, db = %config.database_path.display(), origin = %config.allowed_origin, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
