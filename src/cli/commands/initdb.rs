use anyhow::Result;
use tracing::{debug, error, info, trace};

use crate::config::{connect_database, ensure_sqlite_parent_dir};

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    ensure_sqlite_parent_dir(database_url)?;
    let db = connect_database(database_url).await?;

    info!("Running database migrations");
    if let Err(e) = migration::run::upgrade(&db).await {
        error!("Failed to run database migrations: {}", e);
        return Err(e.into());
    }

    info!("Database initialization completed successfully!");
    Ok(())
}
