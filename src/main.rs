use axum::{http::Method, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripdesk::config::Config;
use tripdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TripDesk server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        flight_lookup = config.aeroapi_key.is_some(),
        "Configuration loaded successfully"
    );

    let addr = SocketAddr::new(config.host.parse()?, config.port);

    // Build application state
    let state = AppState::new(config);

    // CORS for the browser client
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(tripdesk::api::bookings::router())
        .merge(tripdesk::api::people::router())
        .merge(tripdesk::api::travelers::router())
        .merge(tripdesk::api::flights::router())
        .merge(tripdesk::api::report::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, cleaning up...");
}
