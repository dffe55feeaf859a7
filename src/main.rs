//! Talent Service Server
//!
//! Development server exposing the full API with all endpoints enabled.
//! For deployments that need a reduced surface, build a custom router via
//! RouterBuilder in your own binary.

use std::sync::Arc;

use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use talent_service::{
    api::{AppState, RouterBuilder},
    config::AppConfig,
    database::Partition,
    service::{CandidateService, IdentityService, ReportService, TokenService},
    store::{PgCandidateStore, PgIdentityStore},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();

    env_logger::init();

    log::info!("Starting Talent Service v{}", talent_service::VERSION);

    // Load configuration from environment
    let config = AppConfig::from_env()?;
    config.validate()?;

    log::info!("Configuration loaded and validated");

    let pool = config.database.create_pool().await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database migrations completed");

    // The partition is fixed for the lifetime of the process
    let partition = Partition::select(config.live_mode);
    log::info!(
        "Serving from {} partition (tables: {}, {})",
        if config.live_mode { "live" } else { "shadow" },
        partition.identities,
        partition.candidates
    );

    let identity_store = Arc::new(PgIdentityStore::new(pool.clone(), partition.identities));
    let candidate_store = Arc::new(PgCandidateStore::new(pool, partition.candidates));

    let token_service = Arc::new(TokenService::new(
        config.auth.secret.clone(),
        config.auth.token_ttl_minutes,
    ));

    let app_state = AppState {
        identity_service: Arc::new(IdentityService::new(identity_store)),
        candidate_service: Arc::new(CandidateService::new(candidate_store.clone())),
        report_service: Arc::new(ReportService::new(candidate_store)),
        token_service,
    };

    log::info!("Services initialized");

    let app = RouterBuilder::with_all_routes().build(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .into_inner(),
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
