//! # Server Setup
//!
//! Router construction, shared application state, and HTTP server startup.

// region: --- Imports
use axum::extract::FromRef;
use axum::http::HeaderValue;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use lib_core::{create_pool, Config, DbPool};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::require_auth;
use crate::services::NotificationClient;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub notifier: NotificationClient,
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for NotificationClient {
    fn from_ref(state: &AppState) -> Self {
        state.notifier.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Routes
/// Build the application router.
///
/// Split out from [`start_server`] so tests can drive the full middleware
/// stack with `tower::ServiceExt::oneshot`.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/v1/profile/change-password",
            post(handlers::profile::change_password),
        )
        .route("/api/v1/profile", put(handlers::profile::update_profile))
        .route("/api/v1/users/account", delete(handlers::users::delete_account))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route(
            "/api/v1/users/forgot-password",
            post(handlers::users::forgot_password),
        )
        .route("/api/v1/users/reset", patch(handlers::users::reset_password))
        .route("/api/v1/users/{id}", get(handlers::users::get_user))
        .merge(protected)
        .with_state(state)
}
// endregion: --- Routes

// region: --- Server Setup
/// Initialize and start the HTTP server.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails (missing signing secret)
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    dotenvy::dotenv().ok();

    info!("Loading configuration...");
    let config = Config::from_env()?;
    config.validate()?;

    // Ensure the data directory exists for a file-backed SQLite database.
    if let Some(db_path) = config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;

    info!(
        "Running database migrations from: {}",
        server_config.migrations_path
    );
    let migrator =
        sqlx::migrate::Migrator::new(std::path::Path::new(server_config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!("Migrations complete");

    let notifier = NotificationClient::new(config.notification_url.clone());
    let state = AppState {
        db: pool,
        config,
        notifier,
    };

    let origins: Vec<HeaderValue> = server_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Listening on {}", server_config.bind_address);
    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
// endregion: --- Server Setup
