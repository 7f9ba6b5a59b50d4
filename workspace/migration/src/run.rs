//! Library entry points for evolving the schema.
//!
//! `upgrade` applies every pending migration, `downgrade` reverts the most
//! recently applied one. Neither retries: a failure is logged and returned.

use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use tracing::{debug, error, info, instrument};

use crate::{Migrator, MigrationError};

const COMMISSION_TABLE: &str = "comissoes_lojas";
const MACHINE_TABLE: &str = "maquinas";
const PERCENTAGE_COLUMN: &str = "percentual_comissao";

/// Apply all pending migrations.
#[instrument(skip(db))]
pub async fn upgrade(db: &DatabaseConnection) -> Result<(), MigrationError> {
    info!("Applying pending migrations");
    match Migrator::up(db, None).await {
        Ok(()) => {
            debug!("All pending migrations have been applied");
            Ok(())
        }
        Err(source) => {
            error!("Upgrade failed: {}", source);
            Err(MigrationError::Failed {
                operation: "upgrade",
                source,
            })
        }
    }
}

/// Revert the most recently applied migration.
#[instrument(skip(db))]
pub async fn downgrade(db: &DatabaseConnection) -> Result<(), MigrationError> {
    info!("Reverting the latest migration");
    match Migrator::down(db, Some(1)).await {
        Ok(()) => {
            debug!("Latest migration reverted");
            Ok(())
        }
        Err(source) => {
            error!("Downgrade failed: {}", source);
            Err(MigrationError::Failed {
                operation: "downgrade",
                source,
            })
        }
    }
}

/// Whether both the `percentual_comissao` column and the `comissoes_lojas`
/// table are present.
pub async fn has_commission_schema(db: &DatabaseConnection) -> Result<bool, MigrationError> {
    let manager = SchemaManager::new(db);
    let has_table = manager.has_table(COMMISSION_TABLE).await?;
    let has_column = manager.has_column(MACHINE_TABLE, PERCENTAGE_COLUMN).await?;
    debug!(has_table, has_column, "Inspected commission schema");
    Ok(has_table && has_column)
}
