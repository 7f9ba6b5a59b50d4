use anyhow::Result;
use moka::future::Cache;
use sea_orm::{Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::schemas::AppState;

/// Upper bound on the number of users whose pending count is cached.
const PENDING_COUNT_CACHE_CAPACITY: u64 = 10_000;

/// Connect to the database at `database_url`.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to database: {}", database_url);
    match Database::connect(database_url).await {
        Ok(db) => {
            debug!("Database connection established");
            Ok(db)
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            Err(e.into())
        }
    }
}

/// Create the directory holding a file-backed SQLite database.
///
/// Non-SQLite and in-memory URLs are left alone.
pub fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

/// Build the pending-count cache. Entries expire after one badge refresh interval.
pub fn build_pending_cache(badge_refresh: Duration) -> Cache<uuid::Uuid, u64> {
    Cache::builder()
        .max_capacity(PENDING_COUNT_CACHE_CAPACITY)
        .time_to_live(badge_refresh)
        .build()
}

/// Initialize application state for the given database
pub async fn initialize_app_state_with_url(
    database_url: &str,
    badge_refresh: Duration,
) -> Result<AppState> {
    let db = connect_database(database_url).await?;
    let pending_counts = build_pending_cache(badge_refresh);

    Ok(AppState {
        db,
        pending_counts,
        badge_refresh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite://data/frota.db?mode=rwc"), Some("data/frota.db"));
        assert_eq!(sqlite_file_path("sqlite:///var/lib/frota.db"), Some("/var/lib/frota.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgresql://user@localhost/frota"), None);
    }

    #[tokio::test]
    async fn test_initialize_app_state_in_memory() {
        let state = initialize_app_state_with_url("sqlite::memory:", Duration::from_secs(15))
            .await
            .unwrap();
        assert_eq!(state.badge_refresh, Duration::from_secs(15));
        assert!(state.db.ping().await.is_ok());
    }
}
