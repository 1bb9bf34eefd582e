//! Booking service binary.
//!
//! Loads configuration, connects storage, and serves the HTTP API until
//! Ctrl+C or SIGTERM.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use conference_booking::adapters::auth::{issue_session_token, JwtSessionValidator};
use conference_booking::adapters::http::middleware::AuthState;
use conference_booking::adapters::http::{app_router, BookingAppState};
use conference_booking::adapters::memory::{Fixture, InMemoryStore};
use conference_booking::adapters::postgres::{
    PostgresBookingRepository, PostgresEnrollmentReader, PostgresRoomReader,
    PostgresSessionStore, PostgresTicketReader,
};
use conference_booking::config::{AppConfig, DatabaseConfig, ServerConfig};
use conference_booking::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let (state, sessions) = match &config.database {
        Some(database) => postgres_state(database).await?,
        None => memory_state(&config).await?,
    };

    let validator: AuthState = Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret, sessions));

    let app = app_router(state, validator)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Booking service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Booking service stopped");
    Ok(())
}

async fn postgres_state(
    database: &DatabaseConfig,
) -> Result<(BookingAppState, Arc<dyn SessionStore>), Box<dyn std::error::Error>> {
    let pool = database.connect().await?;

    if database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let state = BookingAppState {
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        rooms: Arc::new(PostgresRoomReader::new(pool.clone())),
        enrollments: Arc::new(PostgresEnrollmentReader::new(pool.clone())),
        tickets: Arc::new(PostgresTicketReader::new(pool.clone())),
    };
    let sessions: Arc<dyn SessionStore> = Arc::new(PostgresSessionStore::new(pool));

    Ok((state, sessions))
}

/// Seeds the in-memory store and opens a session for every attendee.
async fn memory_state(
    config: &AppConfig,
) -> Result<(BookingAppState, Arc<dyn SessionStore>), Box<dyn std::error::Error>> {
    tracing::warn!("No database configured, bookings are kept in memory");

    let fixture = match &config.fixture_path {
        Some(path) => Fixture::load(path)?,
        None => Fixture::demo(),
    };
    let store = InMemoryStore::new();

    for user_id in store.seed(&fixture).await? {
        let token = issue_session_token(&config.auth.jwt_secret, user_id)?;
        store.add_session(token.clone(), user_id).await;
        tracing::info!(%user_id, %token, "Attendee session ready");
    }

    let sessions: Arc<dyn SessionStore> = Arc::new(store.clone());
    Ok((BookingAppState::in_memory(store), sessions))
}

/// JSON logs in production, human-readable output elsewhere. `RUST_LOG`
/// overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let production = server.is_production();

    tracing_subscriber::registry()
        .with(filter)
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!production).then(|| tracing_subscriber::fmt::layer().with_target(false)))
        .init();
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
