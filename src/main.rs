use crate::config::FilmtarConfig;
use crate::database::sqlite::SqliteFilmRepository;
use crate::database::FilmRepository;
use anyhow::Context;
use axum::{middleware, Router};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Sqlite;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
mod cors;
mod database;
mod features;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn FilmRepository>,
    pub config: Arc<FilmtarConfig>,
}

// full application with middleware, shared between main and the API tests
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(features::films::films_router())
        .with_state(state)
        .layer(middleware::from_fn(cors::cors_middleware))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmtar_server=debug,sqlx=warn".to_string()),
        )
        .init();

    // load centralized config
    let config = FilmtarConfig::from_env();
    let shared_config = Arc::new(config.clone());

    // create the db file on first run
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::info!(url = %config.database_url, "database does not exist, creating");
        Sqlite::create_database(&config.database_url)
            .await
            .context(format!(
                "Unable to create database at {}",
                config.database_url
            ))?;
    }

    // connect to our db; an unreachable database is fatal, no retry loop
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context(format!("Failed to create pool on {}", config.database_url))?;

    // startup ping
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Database is unreachable")?;

    // run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Successfully connected to the database");

    let repo = SqliteFilmRepository::new(pool, config.table_name.clone());
    let state = AppState {
        repo: Arc::new(repo),
        config: shared_config,
    };

    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
