//! Period tracker HTTP server.

use std::error::Error;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use period_tracker::adapters::http::{self, PeriodHandlers};
use period_tracker::adapters::{
    InMemoryPeriodStore, PostgresPeriodReader, PostgresPeriodRepository, StaticTokenValidator,
};
use period_tracker::config::{AppConfig, DatabaseConfig, ServerConfig};
use period_tracker::logging;
use period_tracker::ports::{PeriodReader, PeriodRepository, SessionValidator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    logging::init(&config.server.log_level, config.server.log_format)?;

    let (repository, reader) = match &config.database {
        Some(database) => connect_postgres(database).await?,
        None => {
            tracing::warn!("No database configured, periods are kept in memory");
            let store = Arc::new(InMemoryPeriodStore::new());
            (
                store.clone() as Arc<dyn PeriodRepository>,
                store as Arc<dyn PeriodReader>,
            )
        }
    };

    let validator = StaticTokenValidator::from_pairs(config.auth.token_pairs()?)?;
    if validator.token_count() == 0 {
        tracing::warn!("No static tokens configured, every API request will be rejected");
    }
    let validator: Arc<dyn SessionValidator> = Arc::new(validator);

    let handlers = PeriodHandlers::from_ports(repository, reader);
    let app = with_transport_layers(http::router(handlers, validator), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_postgres(
    database: &DatabaseConfig,
) -> Result<(Arc<dyn PeriodRepository>, Arc<dyn PeriodReader>), Box<dyn Error>> {
    let pool = database.pool_options().connect(&database.url).await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresPeriodRepository::new(pool.clone())),
        Arc::new(PostgresPeriodReader::new(pool)),
    ))
}

fn with_transport_layers(app: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    app.layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
