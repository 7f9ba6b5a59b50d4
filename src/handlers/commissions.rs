use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{CommissionPageDto, CommissionRecordDto, ComputeCommissionRequest, Role};
use compute::{CommissionRequest, commission};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::access::CurrentSession;
use crate::helpers::converters::commission_to_dto;
use crate::helpers::errors::{self, ApiError};
use crate::schemas::{ApiResponse, AppState, CommissionListQuery};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 20;

/// Compute and store a commission snapshot for a store
#[utoipa::path(
    post,
    path = "/api/v1/stores/{store_id}/commissions",
    tag = "commissions",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
    ),
    request_body = ComputeCommissionRequest,
    responses(
        (status = 201, description = "Commission snapshot stored", body = ApiResponse<CommissionRecordDto>),
        (status = 400, description = "Invalid machine set or stored percentage", body = ErrorResponse),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 403, description = "Manager role required", body = ErrorResponse),
        (status = 404, description = "Store or route not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn compute_commission(
    session: CurrentSession,
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<ComputeCommissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommissionRecordDto>>), ApiError> {
    trace!("Entering compute_commission function for store_id: {}", store_id);
    session.require(Some(Role::Manager))?;

    let mut computation = CommissionRequest::for_store(store_id).with_route(request.route_id);
    if let Some(machine_ids) = request.machine_ids {
        computation = computation.restricted_to(machine_ids);
    }

    let record = compute::compute_store_commission_for(&state.db, computation)
        .await
        .map_err(errors::from_compute)?;

    info!(
        "Commission snapshot {} stored for store {}",
        record.id, store_id
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            commission_to_dto(record),
            "Commission computed successfully",
        )),
    ))
}

/// Commission history of a store, newest first
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/commissions",
    tag = "commissions",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        CommissionListQuery
    ),
    responses(
        (status = 200, description = "Commission snapshots retrieved", body = ApiResponse<CommissionPageDto>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_store_commissions(
    session: CurrentSession,
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<CommissionListQuery>>,
) -> Result<Json<ApiResponse<CommissionPageDto>>, ApiError> {
    session.require(None)?;

    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let (records, total) = commission::list_store_commissions(&state.db, store_id, page, limit)
        .await
        .map_err(errors::from_compute)?;

    debug!("Returning {} of {} snapshots for store {}", records.len(), total, store_id);
    Ok(Json(ApiResponse::ok(
        CommissionPageDto {
            items: records.into_iter().map(commission_to_dto).collect(),
            total,
            page,
            limit,
        },
        "Commission records retrieved successfully",
    )))
}

/// Get a commission snapshot by ID
#[utoipa::path(
    get,
    path = "/api/v1/commissions/{commission_id}",
    tag = "commissions",
    params(
        ("commission_id" = Uuid, Path, description = "Commission snapshot ID"),
    ),
    responses(
        (status = 200, description = "Commission snapshot retrieved", body = ApiResponse<CommissionRecordDto>),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 404, description = "Commission snapshot not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_commission(
    session: CurrentSession,
    Path(commission_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CommissionRecordDto>>, ApiError> {
    session.require(None)?;

    let record = commission::get_commission(&state.db, commission_id)
        .await
        .map_err(errors::from_compute)?;

    Ok(Json(ApiResponse::ok(
        commission_to_dto(record),
        "Commission record retrieved successfully",
    )))
}

/// Purge a commission snapshot
#[utoipa::path(
    delete,
    path = "/api/v1/commissions/{commission_id}",
    tag = "commissions",
    params(
        ("commission_id" = Uuid, Path, description = "Commission snapshot ID"),
    ),
    responses(
        (status = 200, description = "Commission snapshot purged", body = ApiResponse<String>),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Commission snapshot not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn purge_commission(
    session: CurrentSession,
    Path(commission_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    session.require(Some(Role::Admin))?;

    commission::purge_commission(&state.db, commission_id)
        .await
        .map_err(errors::from_compute)?;

    Ok(Json(ApiResponse::ok(
        format!("Commission record {} purged", commission_id),
        "Commission record purged successfully",
    )))
}
