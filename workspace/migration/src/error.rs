use sea_orm::DbErr;
use thiserror::Error;

/// Errors reported by the schema evolution entry points.
///
/// A failed run is reported as-is. Nothing is rolled back on the caller's behalf:
/// a partially applied step has to be repaired by the operator.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A schema change failed partway
    #[error("Migration {operation} failed: {source}")]
    Failed {
        operation: &'static str,
        #[source]
        source: DbErr,
    },

    /// The current schema could not be inspected
    #[error("Schema inspection error: {0}")]
    Inspection(#[from] DbErr),
}
