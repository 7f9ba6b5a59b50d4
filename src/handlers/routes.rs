use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{CreateRouteRequest, RouteDto};
use model::entities::roteiro;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::helpers::converters::route_to_dto;
use crate::helpers::errors::{self, ApiError};
use crate::schemas::{ApiResponse, AppState};

/// Create a new route
#[utoipa::path(
    post,
    path = "/api/v1/routes",
    tag = "routes",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Route created successfully", body = ApiResponse<RouteDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RouteDto>>), ApiError> {
    let nome = request.nome.trim();
    if nome.is_empty() {
        return Err(errors::validation("Route name must not be empty"));
    }

    let route = roteiro::ActiveModel {
        nome: Set(nome.to_string()),
        ..roteiro::ActiveModel::new()
    }
    .insert(&state.db)
    .await
    .map_err(|e| errors::database("Failed to create route", e))?;

    info!("Route created successfully with ID: {}", route.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(route_to_dto(route), "Route created successfully")),
    ))
}

/// List all routes
#[utoipa::path(
    get,
    path = "/api/v1/routes",
    tag = "routes",
    responses(
        (status = 200, description = "Routes retrieved successfully", body = ApiResponse<Vec<RouteDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_routes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RouteDto>>>, ApiError> {
    let routes = roteiro::Entity::find()
        .order_by_asc(roteiro::Column::Nome)
        .all(&state.db)
        .await
        .map_err(|e| errors::database("Failed to retrieve routes", e))?;

    debug!("Retrieved {} routes", routes.len());
    Ok(Json(ApiResponse::ok(
        routes.into_iter().map(route_to_dto).collect(),
        "Routes retrieved successfully",
    )))
}

/// Delete a route. Commission snapshots finalized under it are kept and lose the reference.
#[utoipa::path(
    delete,
    path = "/api/v1/routes/{route_id}",
    tag = "routes",
    params(
        ("route_id" = Uuid, Path, description = "Route ID"),
    ),
    responses(
        (status = 200, description = "Route deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Route not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_route(
    Path(route_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let result = roteiro::Entity::delete_by_id(route_id)
        .exec(&state.db)
        .await
        .map_err(|e| errors::database("Failed to delete route", e))?;

    if result.rows_affected == 0 {
        return Err(errors::not_found("Route", route_id));
    }

    info!("Route with ID {} deleted successfully", route_id);
    Ok(Json(ApiResponse::ok(
        format!("Route {} deleted", route_id),
        "Route deleted successfully",
    )))
}
