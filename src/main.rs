//! Parish Content Backend
//!
//! REST backend for the parish content management system: public content
//! reads, a session-gated admin surface and local-disk file uploads, over
//! SQLite persistence.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use storage::Storage;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub storage: Arc<Storage>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Parish Content Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the session secret was not configured
    if config.uses_dev_secret() {
        tracing::warn!(
            "Using the built-in session secret. Set PARISH_SESSION_SECRET in production!"
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize upload storage
    let storage = Arc::new(
        Storage::new(config.upload_dir.clone(), config.public_base_url.clone()).await?,
    );

    // Create application state
    let state = AppState {
        repo,
        storage,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);
    let upload_dir = state.config.upload_dir.clone();

    // Clone the session secret for the auth layer
    let session_secret = state.config.session_secret.clone();

    // Multipart routes carry a body limit sized for the largest upload;
    // the handlers enforce the per-kind ceilings.
    let upload_routes = Router::new()
        .route("/activities/upload-image", post(api::upload_image))
        .route("/articles/upload-image", post(api::upload_image))
        .route("/authors/upload-image", post(api::upload_image))
        .route("/coordinators/upload-image", post(api::upload_image))
        .route("/pastors/upload-image", post(api::upload_image))
        .route("/audio-messages/upload-image", post(api::upload_image))
        .route("/audio-messages", post(api::create_audio_message))
        .route("/memories/upload-photo", post(api::upload_photo))
        .layer(DefaultBodyLimit::max(api::MAX_AUDIO_BYTES + 1024 * 1024));

    // Admin routes, all behind the session gate
    let admin_routes = Router::new()
        // Session
        .route("/auth/me", get(api::me))
        // Activities
        .route("/activities", post(api::create_activity))
        .route("/activities/{id}", put(api::update_activity))
        .route("/activities/{id}", delete(api::delete_activity))
        // Articles
        .route("/articles", post(api::create_article))
        .route("/articles/{id}", put(api::update_article))
        .route("/articles/{id}", delete(api::delete_article))
        // Authors
        .route("/authors", post(api::create_author))
        .route("/authors/{id}", put(api::update_author))
        .route("/authors/{id}", delete(api::delete_author))
        // Coordinators
        .route("/coordinators", post(api::create_coordinator))
        .route("/coordinators/{id}", put(api::update_coordinator))
        .route("/coordinators/{id}", delete(api::delete_coordinator))
        // Memories
        .route("/memories", post(api::create_memory))
        .route("/memories/{id}", put(api::update_memory))
        .route("/memories/{id}", delete(api::delete_memory))
        .route(
            "/memories/activity/{activity_id}",
            delete(api::delete_memories_by_activity),
        )
        // Audio messages (create is multipart, in upload_routes)
        .route("/audio-messages/{id}", put(api::update_audio_message))
        .route("/audio-messages/{id}", delete(api::delete_audio_message))
        // Categories
        .route("/categories", get(api::list_all_categories))
        .route("/categories", post(api::create_category))
        .route("/categories/{id}", get(api::get_category))
        .route("/categories/{id}", put(api::update_category))
        .route("/categories/{id}", delete(api::delete_category))
        // Messages (admin sees drafts)
        .route("/messages", get(api::list_all_messages))
        .route("/messages", post(api::create_message))
        .route("/messages/{id}", get(api::get_message))
        .route("/messages/{id}", put(api::update_message))
        .route("/messages/{id}", delete(api::delete_message))
        // Pastors
        .route("/pastors", get(api::list_all_pastors))
        .route("/pastors", post(api::create_pastor))
        .route("/pastors/{id}", put(api::update_pastor))
        .route("/pastors/{id}", delete(api::delete_pastor))
        .merge(upload_routes)
        // Apply session auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::session_auth_layer(session_secret.clone(), req, next)
        }));

    // Public API routes
    let api_routes = Router::new()
        // Auth
        .route("/auth/setup", post(api::setup))
        .route("/auth/login", post(api::login))
        // Activities
        .route("/activities", get(api::list_activities))
        .route("/activities/{id}", get(api::get_activity))
        // Articles
        .route("/articles", get(api::list_articles))
        .route("/articles/author/{author_id}", get(api::list_articles_by_author))
        .route("/articles/{id}", get(api::get_article))
        // Authors
        .route("/authors", get(api::list_authors))
        .route("/authors/{id}", get(api::get_author))
        // Coordinators
        .route("/coordinators", get(api::list_coordinators))
        .route("/coordinators/featured", get(api::list_featured_coordinators))
        .route("/coordinators/{id}", get(api::get_coordinator))
        // Memories
        .route("/memories", get(api::list_memories))
        .route(
            "/memories/activity/{activity_id}",
            get(api::list_memories_by_activity),
        )
        .route("/memories/{id}", get(api::get_memory))
        // Audio messages
        .route("/audio-messages", get(api::list_audio_messages))
        .route("/audio-messages/categories", get(api::list_active_categories))
        .route(
            "/audio-messages/category/{category}",
            get(api::list_audio_messages_by_category),
        )
        .route("/audio-messages/{id}", get(api::get_audio_message))
        // Messages (published only)
        .route("/messages", get(api::list_published_messages))
        .route(
            "/messages/coordinator/{coordinator_id}",
            get(api::list_messages_by_coordinator),
        )
        .route("/messages/{id}", get(api::get_published_message))
        // Pastors (active only)
        .route("/pastors", get(api::list_active_pastors))
        .route("/pastors/{id}", get(api::get_pastor))
        .nest("/admin", admin_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
