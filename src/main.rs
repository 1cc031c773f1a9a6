use todo_api::{
    application::todo_service::{example_todo, TodoService, TodoServiceImpl},
    config::{Config, StoreKind},
    domain::repository::TodoRepository,
    http::routing::{self, todos},
    infrastructure::{memory_repo::InMemoryTodoRepository, sqlite_repo::SqliteTodoRepository},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    match config.store {
        StoreKind::Sqlite => {
            let repo = SqliteTodoRepository::connect(&config.database_url).await?;
            serve(&config, repo).await
        }
        StoreKind::Memory => serve(&config, InMemoryTodoRepository::default()).await,
    }
}

async fn serve<R: TodoRepository + Clone>(config: &Config, repo: R) -> anyhow::Result<()> {
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    if config.seed_example {
        if let Some(todo) = service.seed_if_empty(example_todo()).await? {
            tracing::info!(id = %todo.id, "seeded example todo");
        }
    }
    let router = routing::app(todos::router(todos::AppState { service }));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, store = ?config.store, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
