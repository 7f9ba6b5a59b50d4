use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{CreateTaskRequest, PendingCountDto, Role, TaskDto};
use model::entities::tarefa;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::access::CurrentSession;
use crate::helpers::converters::task_to_dto;
use crate::helpers::errors::{self, ApiError, api_error};
use crate::schemas::{ApiResponse, AppState};

/// Assign a task to a user
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created successfully", body = ApiResponse<TaskDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaskDto>>), ApiError> {
    let titulo = request.titulo.trim();
    if titulo.is_empty() {
        return Err(errors::validation("Task title must not be empty"));
    }

    let mut task = tarefa::ActiveModel {
        usuario_id: Set(request.usuario_id),
        titulo: Set(titulo.to_string()),
        ..tarefa::ActiveModel::new()
    };
    if let Some(status) = request.status {
        let status = status.trim().to_lowercase();
        if status.is_empty() {
            return Err(errors::validation("Task status must not be empty"));
        }
        task.status = Set(status);
    }

    let task = task
        .insert(&state.db)
        .await
        .map_err(|e| errors::database("Failed to create task", e))?;

    // The owner's badge must reflect the new task on the next poll.
    state.pending_counts.invalidate(&task.usuario_id).await;

    info!("Task {} assigned to user {}", task.id, task.usuario_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(task_to_dto(task), "Task created successfully")),
    ))
}

/// Number of pending tasks assigned to a user
///
/// Operators may only read their own counter. The value is cached for the
/// refresh interval returned in the payload.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/pending-count",
    tag = "tasks",
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Pending task count", body = ApiResponse<PendingCountDto>),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 403, description = "Counter of another user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_pending_count(
    session: CurrentSession,
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PendingCountDto>>, ApiError> {
    trace!("Entering get_pending_count function for user_id: {}", user_id);
    if let Some(current) = session.require(None)? {
        if current.user_id != user_id && current.role < Role::Manager {
            return Err(api_error(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Operators can only read their own pending count",
            ));
        }
    }

    let count = state
        .pending_counts
        .try_get_with(user_id, async {
            debug!("Pending count for user {} not cached, querying", user_id);
            compute::fetch_pending_count(&state.db, user_id).await
        })
        .await
        .map_err(|e| errors::from_compute_ref(&e))?;

    Ok(Json(ApiResponse::ok(
        PendingCountDto {
            usuario_id: user_id,
            count,
            refresh_interval_secs: state.badge_refresh.as_secs(),
        },
        "Pending count retrieved successfully",
    )))
}
