//! Fixtures for the HTTP integration tests.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use common::Role;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::access::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::config::build_pending_cache;
use crate::router::create_router;
use crate::schemas::AppState;

pub const TEST_BADGE_REFRESH: Duration = Duration::from_secs(30);

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create AppState for testing
pub async fn setup_test_app_state() -> AppState {
    AppState {
        db: setup_test_db().await,
        pending_counts: build_pending_cache(TEST_BADGE_REFRESH),
        badge_refresh: TEST_BADGE_REFRESH,
    }
}

/// Install a stderr subscriber once per test binary. The level follows
/// RUST_LOG and defaults to warn.
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Create axum app for testing
pub async fn setup_test_app() -> Router {
    init_test_tracing();
    create_router(setup_test_app_state().await)
}

/// Test server around a fresh app and database
pub async fn setup_test_server() -> TestServer {
    TestServer::new(setup_test_app().await).expect("Failed to start test server")
}

/// Attach the identity headers of a signed-in user with `role`.
pub fn as_user(request: TestRequest, user_id: Uuid, role: Role) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&user_id.to_string()).expect("uuid is a valid header value"),
        )
        .add_header(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from_str(&role.to_string()).expect("role is a valid header value"),
        )
}
