use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{CreateMachineRequest, MachineDto, UpdateMachineRequest};
use compute::commission::{validate_percentage, validate_profit};
use model::entities::{loja, maquina};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::helpers::converters::machine_to_dto;
use crate::helpers::errors::{self, ApiError};
use crate::schemas::{ApiResponse, AppState};

async fn ensure_store_exists(state: &AppState, store_id: Uuid) -> Result<loja::Model, ApiError> {
    loja::Entity::find_by_id(store_id)
        .one(&state.db)
        .await
        .map_err(|e| errors::database("Failed to lookup store", e))?
        .ok_or_else(|| errors::not_found("Store", store_id))
}

/// Place a new machine in a store
#[utoipa::path(
    post,
    path = "/api/v1/stores/{store_id}/machines",
    tag = "machines",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
    ),
    request_body = CreateMachineRequest,
    responses(
        (status = 201, description = "Machine created successfully", body = ApiResponse<MachineDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_machine(
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<CreateMachineRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MachineDto>>), ApiError> {
    trace!("Entering create_machine function for store_id: {}", store_id);
    let identificador = request.identificador.trim();
    if identificador.is_empty() {
        return Err(errors::validation("Machine identifier must not be empty"));
    }
    let percentage = request.percentual_comissao.unwrap_or(Decimal::ZERO);
    validate_percentage(percentage).map_err(errors::from_compute)?;
    let profit = request.lucro_acumulado.unwrap_or(Decimal::ZERO);
    validate_profit(profit).map_err(errors::from_compute)?;

    let store = ensure_store_exists(&state, store_id).await?;

    let machine = maquina::ActiveModel {
        loja_id: Set(store.id),
        identificador: Set(identificador.to_string()),
        lucro_acumulado: Set(profit),
        percentual_comissao: Set(Some(percentage)),
        ..maquina::ActiveModel::new()
    }
    .insert(&state.db)
    .await
    .map_err(|e| errors::database("Failed to create machine", e))?;

    info!(
        "Machine {} ({}) placed in store {}",
        machine.id, machine.identificador, store.nome
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(machine_to_dto(machine), "Machine created successfully")),
    ))
}

/// List the machines of a store
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/machines",
    tag = "machines",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Machines retrieved successfully", body = ApiResponse<Vec<MachineDto>>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_store_machines(
    Path(store_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MachineDto>>>, ApiError> {
    ensure_store_exists(&state, store_id).await?;

    let machines = maquina::Entity::find()
        .filter(maquina::Column::LojaId.eq(store_id))
        .order_by_asc(maquina::Column::Identificador)
        .all(&state.db)
        .await
        .map_err(|e| errors::database("Failed to retrieve machines", e))?;

    debug!("Retrieved {} machines for store {}", machines.len(), store_id);
    Ok(Json(ApiResponse::ok(
        machines.into_iter().map(machine_to_dto).collect(),
        "Machines retrieved successfully",
    )))
}

/// Update a machine's identifier, accrued profit or commission percentage
#[utoipa::path(
    put,
    path = "/api/v1/machines/{machine_id}",
    tag = "machines",
    params(
        ("machine_id" = Uuid, Path, description = "Machine ID"),
    ),
    request_body = UpdateMachineRequest,
    responses(
        (status = 200, description = "Machine updated successfully", body = ApiResponse<MachineDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Machine not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_machine(
    Path(machine_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMachineRequest>,
) -> Result<Json<ApiResponse<MachineDto>>, ApiError> {
    trace!("Entering update_machine function for machine_id: {}", machine_id);

    if request.clear_percentual_comissao && request.percentual_comissao.is_some() {
        return Err(errors::validation(
            "Cannot set and clear the commission percentage in the same request",
        ));
    }
    if let Some(percentage) = request.percentual_comissao {
        validate_percentage(percentage).map_err(errors::from_compute)?;
    }
    if let Some(profit) = request.lucro_acumulado {
        validate_profit(profit).map_err(errors::from_compute)?;
    }

    let existing = maquina::Entity::find_by_id(machine_id)
        .one(&state.db)
        .await
        .map_err(|e| errors::database("Failed to lookup machine", e))?
        .ok_or_else(|| errors::not_found("Machine", machine_id))?;

    let mut active: maquina::ActiveModel = existing.into();
    let mut updated_fields = Vec::new();

    if let Some(identificador) = request.identificador {
        let identificador = identificador.trim().to_string();
        if identificador.is_empty() {
            return Err(errors::validation("Machine identifier must not be empty"));
        }
        updated_fields.push(format!("identificador: {}", identificador));
        active.identificador = Set(identificador);
    }
    if let Some(profit) = request.lucro_acumulado {
        updated_fields.push(format!("lucro_acumulado: {}", profit));
        active.lucro_acumulado = Set(profit);
    }
    if let Some(percentage) = request.percentual_comissao {
        updated_fields.push(format!("percentual_comissao: {}", percentage));
        active.percentual_comissao = Set(Some(percentage));
    } else if request.clear_percentual_comissao {
        updated_fields.push("percentual_comissao: cleared".to_string());
        active.percentual_comissao = Set(None);
    }

    if updated_fields.is_empty() {
        debug!("No fields to update for machine ID: {}", machine_id);
    } else {
        debug!("Updating fields: {}", updated_fields.join(", "));
    }

    let machine = active
        .update(&state.db)
        .await
        .map_err(|e| errors::database("Failed to update machine", e))?;

    info!("Machine with ID {} updated successfully", machine_id);
    Ok(Json(ApiResponse::ok(
        machine_to_dto(machine),
        "Machine updated successfully",
    )))
}

/// Remove a machine from its store
#[utoipa::path(
    delete,
    path = "/api/v1/machines/{machine_id}",
    tag = "machines",
    params(
        ("machine_id" = Uuid, Path, description = "Machine ID"),
    ),
    responses(
        (status = 200, description = "Machine deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Machine not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_machine(
    Path(machine_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let result = maquina::Entity::delete_by_id(machine_id)
        .exec(&state.db)
        .await
        .map_err(|e| errors::database("Failed to delete machine", e))?;

    if result.rows_affected == 0 {
        return Err(errors::not_found("Machine", machine_id));
    }

    info!("Machine with ID {} deleted successfully", machine_id);
    Ok(Json(ApiResponse::ok(
        format!("Machine {} deleted", machine_id),
        "Machine deleted successfully",
    )))
}
