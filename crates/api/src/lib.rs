//! # CommonSlot API
//!
//! The web server for the CommonSlot scheduling service. It exposes the
//! "find a common meeting time" search over stored groups and over ad-hoc
//! member lists.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into calls on the scheduling engine
//! - **Middleware**: Error mapping to HTTP responses
//! - **Config**: Environment and application configuration
//!
//! Handlers never talk to the database directly. They go through the
//! `EventSource` and `MemberDirectory` traits, backed by `PgStore` in
//! production and by mocks in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers for slot search and busy timelines
pub mod handlers;
/// Error mapping shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use commonslot_core::{
    SchedulingEngine,
    sources::{EventSource, MemberDirectory},
};
use commonslot_db::PgStore;
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Resolves a group id to its member ids
    pub directory: Arc<dyn MemberDirectory>,
    /// Collect → merge → search pipeline over the event source
    pub engine: SchedulingEngine,
    /// Step used when a request does not carry `step_minutes`
    pub default_step_minutes: i64,
}

impl ApiState {
    pub fn new(
        events: Arc<dyn EventSource>,
        directory: Arc<dyn MemberDirectory>,
        default_step_minutes: i64,
    ) -> Self {
        Self {
            directory,
            engine: SchedulingEngine::new(events),
            default_step_minutes,
        }
    }

    /// State backed by a single PostgreSQL store for both events and groups.
    pub fn from_store(store: PgStore, default_step_minutes: i64) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, default_step_minutes)
    }
}

/// All routes with state attached, without transport middleware.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Group slot search endpoints
        .merge(routes::group::routes())
        // Ad-hoc member list endpoints
        .merge(routes::availability::routes())
        .with_state(state)
}

/// The full application: routes plus tracing, request deadline and CORS.
pub fn router(state: Arc<ApiState>, config: &config::ApiConfig) -> Result<Router> {
    let app = app(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    Ok(app)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(AllowOrigin::list(origins)))
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use commonslot_api::{config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let db_pool =
///     commonslot_db::create_pool(&config.database_url, config.db_max_connections).await?;
/// start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_store(
        PgStore::new(db_pool),
        config.default_step_minutes,
    ));
    let app = router(state, &config)?;

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
