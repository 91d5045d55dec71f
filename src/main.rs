//! Frontdesk Server - Visitor Check-in and Approval System
//!
//! A Rust REST API server for multi-location visitor management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontdesk_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("frontdesk_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Frontdesk Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);

    // Seed defaults; a partial seed should not block startup
    if let Err(e) = frontdesk_server::services::seed::run(&repository).await {
        tracing::warn!("Startup seeding incomplete: {}", e);
    }

    let services = Services::new(repository, &config);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Visitors
        .route("/visitors", post(api::visitors::register))
        .route("/visitors", get(api::visitors::list_visitors))
        .route("/visitors/today", get(api::visitors::list_today))
        .route("/visitors/stats", get(api::visitors::get_stats))
        .route("/visitors/:id", get(api::visitors::get_visitor))
        .route("/visitors/:id", delete(api::visitors::delete_visitor))
        .route("/visitors/:id/status", put(api::visitors::update_status))
        .route("/visitors/:id/checkin", post(api::visitors::check_in))
        .route("/visitors/:id/checkout", post(api::visitors::check_out))
        .route("/visitors/:id/approve", get(api::visitors::approve))
        // Locations
        .route("/locations", get(api::locations::list_locations))
        .route("/locations", post(api::locations::create_location))
        .route("/locations/by-slug/:slug", get(api::locations::get_location_by_slug))
        .route("/locations/:id", get(api::locations::get_location))
        .route("/locations/:id", put(api::locations::update_location))
        .route("/locations/:id", delete(api::locations::delete_location))
        // Staff
        .route("/staff", get(api::staff::list_staff))
        .route("/staff", post(api::staff::create_staff_member))
        .route("/staff/public", get(api::staff::list_staff_public))
        .route("/staff/:id", get(api::staff::get_staff_member))
        .route("/staff/:id", put(api::staff::update_staff_member))
        .route("/staff/:id", delete(api::staff::delete_staff_member))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        // Roles
        .route("/roles", get(api::roles::list_roles))
        .route("/roles", post(api::roles::create_role))
        .route("/roles/:id", get(api::roles::get_role))
        .route("/roles/:id", put(api::roles::update_role))
        .route("/roles/:id", delete(api::roles::delete_role))
        // Custom fields
        .route("/custom-fields", get(api::custom_fields::list_custom_fields))
        .route("/custom-fields", post(api::custom_fields::create_custom_field))
        .route("/custom-fields/:id", get(api::custom_fields::get_custom_field))
        .route("/custom-fields/:id", put(api::custom_fields::update_custom_field))
        .route("/custom-fields/:id", delete(api::custom_fields::delete_custom_field))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
