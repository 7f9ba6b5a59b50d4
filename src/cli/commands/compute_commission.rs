use anyhow::Result;
use tracing::{error, info, trace};
use uuid::Uuid;

use crate::config::connect_database;
use crate::helpers::converters::commission_to_dto;

/// Compute one commission snapshot and print it to stdout as JSON.
pub async fn compute_commission(
    database_url: &str,
    store_id: Uuid,
    route_id: Option<Uuid>,
) -> Result<()> {
    trace!("Entering compute_commission function");
    let db = connect_database(database_url).await?;

    let record = match compute::compute_store_commission(&db, store_id, route_id).await {
        Ok(record) => record,
        Err(e) => {
            error!("Commission computation for store {} failed: {}", store_id, e);
            return Err(e.into());
        }
    };
    info!("Stored commission snapshot {}", record.id);

    println!("{}", serde_json::to_string_pretty(&commission_to_dto(record))?);
    Ok(())
}
