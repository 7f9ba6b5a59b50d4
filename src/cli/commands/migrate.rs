use anyhow::Result;
use tracing::{debug, error, info, trace, warn};

use crate::config::connect_database;

/// Apply every pending migration.
pub async fn upgrade(database_url: &str) -> Result<()> {
    trace!("Entering upgrade function");
    let db = connect_database(database_url).await?;

    if let Err(e) = migration::run::upgrade(&db).await {
        error!("Schema upgrade failed: {}", e);
        return Err(e.into());
    }

    let current = migration::run::has_commission_schema(&db).await?;
    debug!("Commission schema present: {}", current);
    info!("Schema is up to date");
    Ok(())
}

/// Revert the most recently applied migration.
pub async fn downgrade(database_url: &str) -> Result<()> {
    trace!("Entering downgrade function");
    let db = connect_database(database_url).await?;

    if let Err(e) = migration::run::downgrade(&db).await {
        error!("Schema downgrade failed: {}", e);
        return Err(e.into());
    }

    if migration::run::has_commission_schema(&db).await? {
        warn!("Commission schema is still present after downgrade");
    } else {
        info!("Commission schema removed");
    }
    Ok(())
}
