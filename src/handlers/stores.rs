use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{CreateStoreRequest, StoreDto};
use model::entities::loja;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::helpers::converters::store_to_dto;
use crate::helpers::errors::{self, ApiError};
use crate::schemas::{ApiResponse, AppState};

/// Create a new store
#[utoipa::path(
    post,
    path = "/api/v1/stores",
    tag = "stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created successfully", body = ApiResponse<StoreDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_store(
    State(state): State<AppState>,
    Json(request): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StoreDto>>), ApiError> {
    trace!("Entering create_store function");
    let nome = request.nome.trim();
    if nome.is_empty() {
        return Err(errors::validation("Store name must not be empty"));
    }

    let store = loja::ActiveModel {
        nome: Set(nome.to_string()),
        endereco: Set(request.endereco),
        ..loja::ActiveModel::new()
    }
    .insert(&state.db)
    .await
    .map_err(|e| errors::database("Failed to create store", e))?;

    info!("Store created successfully with ID: {}, name: {}", store.id, store.nome);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(store_to_dto(store), "Store created successfully")),
    ))
}

/// List all stores
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "stores",
    responses(
        (status = 200, description = "Stores retrieved successfully", body = ApiResponse<Vec<StoreDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_stores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StoreDto>>>, ApiError> {
    let stores = loja::Entity::find()
        .order_by_asc(loja::Column::Nome)
        .all(&state.db)
        .await
        .map_err(|e| errors::database("Failed to retrieve stores", e))?;

    debug!("Retrieved {} stores", stores.len());
    Ok(Json(ApiResponse::ok(
        stores.into_iter().map(store_to_dto).collect(),
        "Stores retrieved successfully",
    )))
}

/// Get a store by ID
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}",
    tag = "stores",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Store retrieved successfully", body = ApiResponse<StoreDto>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_store(
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StoreDto>>, ApiError> {
    let store = loja::Entity::find_by_id(store_id)
        .one(&state.db)
        .await
        .map_err(|e| errors::database("Failed to retrieve store", e))?
        .ok_or_else(|| errors::not_found("Store", store_id))?;

    Ok(Json(ApiResponse::ok(
        store_to_dto(store),
        "Store retrieved successfully",
    )))
}

/// Delete a store together with its machines and commission history
#[utoipa::path(
    delete,
    path = "/api/v1/stores/{store_id}",
    tag = "stores",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Store deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_store(
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let result = loja::Entity::delete_by_id(store_id)
        .exec(&state.db)
        .await
        .map_err(|e| errors::database("Failed to delete store", e))?;

    if result.rows_affected == 0 {
        return Err(errors::not_found("Store", store_id));
    }

    info!("Store with ID {} deleted successfully", store_id);
    Ok(Json(ApiResponse::ok(
        format!("Store {} deleted", store_id),
        "Store deleted successfully",
    )))
}
