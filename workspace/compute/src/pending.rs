//! Pending task counter behind the notification badge.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::{debug, instrument};
use uuid::Uuid;

use model::entities::tarefa;

use crate::error::Result;

/// Statuses after which a task no longer counts as pending.
pub const TERMINAL_STATUSES: [&str; 2] = ["done", "completed"];

/// Whether a task status still counts towards the badge.
pub fn is_pending_status(status: &str) -> bool {
    !TERMINAL_STATUSES.contains(&status)
}

/// Number of tasks assigned to `user_id` that are not in a terminal status.
#[instrument(skip(db))]
pub async fn fetch_pending_count(db: &DatabaseConnection, user_id: Uuid) -> Result<u64> {
    let count = tarefa::Entity::find()
        .filter(tarefa::Column::UsuarioId.eq(user_id))
        .filter(tarefa::Column::Status.is_not_in(TERMINAL_STATUSES))
        .count(db)
        .await?;
    debug!("User {} has {} pending tasks", user_id, count);
    Ok(count)
}
