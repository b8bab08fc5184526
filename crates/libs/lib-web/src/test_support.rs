//! Shared helpers for lib-web tests: in-memory database, config fixtures,
//! and a stub notification server.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use lib_core::dto::RegisterRequest;
use lib_core::{Config, DbPool};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::{Arc, Mutex};

use crate::server::AppState;
use crate::services::{NotificationClient, NotificationRequest};

/// Create an in-memory SQLite database with the service schema.
///
/// Single connection: every pooled connection to `sqlite::memory:` gets its
/// own database, so the pool must never open a second one.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            diet_preferences TEXT NOT NULL DEFAULT '[]',
            favorite_cuisines TEXT NOT NULL DEFAULT '[]',
            date_created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create users table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_tokens (
            user_token_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            access_token TEXT NOT NULL,
            expires_at TIMESTAMP NOT NULL,
            is_invalid BOOLEAN NOT NULL DEFAULT 0,
            token_type TEXT NOT NULL DEFAULT 'access'
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create user_tokens table");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        token_ttl_minutes: 60,
        reset_base_url: "https://app.recipehub.example/create-new-password".to_string(),
        notification_url: "http://127.0.0.1:9/notifications/send".to_string(),
    }
}

/// A well-formed registration request; confirm matches password.
pub fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
        diet_preferences: Some(vec!["vegetarian".to_string()]),
        favorite_cuisines: Some(vec!["italian".to_string()]),
    }
}

/// Application state backed by a fresh in-memory database. The notifier
/// points at an unreachable endpoint; tests that exercise notification
/// delivery swap in [`spawn_notification_stub`].
pub async fn test_state() -> AppState {
    let config = test_config();
    AppState {
        db: setup_test_db().await,
        notifier: NotificationClient::new(config.notification_url.clone()),
        config,
    }
}

/// Create test app with routes
pub fn test_app(state: AppState) -> Router {
    crate::server::routes(state)
}

/// Spawn a local HTTP server standing in for the notification service.
///
/// Responds to every POST with `status` and records the decoded payloads.
/// Returns the endpoint URL and the shared record of received requests.
pub async fn spawn_notification_stub(
    status: StatusCode,
) -> (String, Arc<Mutex<Vec<NotificationRequest>>>) {
    let received: Arc<Mutex<Vec<NotificationRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();

    let app = Router::new().route(
        "/api/v1/notifications/send",
        post(move |Json(req): Json<NotificationRequest>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(req);
                status
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub listener should bind");
    let addr = listener.local_addr().expect("stub listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server failed");
    });

    (
        format!("http://{}/api/v1/notifications/send", addr),
        received,
    )
}
