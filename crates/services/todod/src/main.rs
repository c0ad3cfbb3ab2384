//! Todo service (todod)
//!
//! Serves the todo REST API. Configuration comes from flags, environment
//! variables or a `.env` file:
//!
//! ```bash
//! export JWT_SECRET=your_jwt_secret
//! export JWT_REFRESH_SECRET=your_refresh_secret
//! export MONGODB_URI=mongodb://localhost:27017
//! todod --port 8080
//! ```
//!
//! Without `MONGODB_URI` the service keeps its data in memory.

use clap::Parser;
use todo_models::db::connection::DbConnection;
use todod::{
    api::{router, serve},
    config::Config,
    prelude::*,
    state::AppState,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,todo_web=debug,todo_models=debug,tower_http=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(err) => debug!("No .env file loaded: {err}"),
    }

    let config = Config::parse();
    info!("Starting with {config:?}");

    let connection = DbConnection::new(&config.db_config()).await?;
    let state = AppState::new(connection, config.token_service());

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    serve(listener, router(state)).await
}
