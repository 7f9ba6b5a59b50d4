//! Common transport-layer types shared between the backend and its API clients.
//! These structs are the request/response payloads of the HTTP handlers, so a
//! client can deserialize API responses without duplicating shapes.

pub mod access;

pub use access::{AccessDecision, Role, Session, SessionState, authorize};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

// ===================== Stores =====================

/// Request body for creating a store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateStoreRequest {
    pub nome: String,
    pub endereco: Option<String>,
}

/// Store response model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoreDto {
    pub id: Uuid,
    pub nome: String,
    pub endereco: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===================== Machines =====================

/// Request body for placing a machine in a store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateMachineRequest {
    pub identificador: String,
    /// Profit accrued so far (default: 0)
    pub lucro_acumulado: Option<Decimal>,
    /// Commission percentage in [0, 100] (default: 0)
    pub percentual_comissao: Option<Decimal>,
}

/// Request body for updating a machine. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct UpdateMachineRequest {
    pub identificador: Option<String>,
    pub lucro_acumulado: Option<Decimal>,
    pub percentual_comissao: Option<Decimal>,
    /// Set to true to clear the commission percentage (counts as zero).
    #[serde(default)]
    pub clear_percentual_comissao: bool,
}

/// Machine response model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MachineDto {
    pub id: Uuid,
    pub loja_id: Uuid,
    pub identificador: String,
    pub lucro_acumulado: Decimal,
    pub percentual_comissao: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===================== Routes =====================

/// Request body for creating a route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateRouteRequest {
    pub nome: String,
}

/// Route response model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteDto {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===================== Commissions =====================

/// Request body for computing a store commission snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct ComputeCommissionRequest {
    /// Route the snapshot is finalized under
    pub route_id: Option<Uuid>,
    /// Restrict the computation to these machines of the store
    pub machine_ids: Option<Vec<Uuid>>,
}

/// One machine's line in a commission snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MachineContributionDto {
    pub machine_id: Uuid,
    pub profit: Decimal,
    pub percentage: Decimal,
    pub commission: Decimal,
}

/// Commission snapshot response model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CommissionRecordDto {
    pub id: Uuid,
    pub loja_id: Uuid,
    pub roteiro_id: Option<Uuid>,
    pub data_calculo: DateTime<Utc>,
    pub total_lucro: Decimal,
    pub total_comissao: Decimal,
    /// Per-machine breakdown, ordered by machine id
    pub detalhes: Vec<MachineContributionDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A page of commission snapshots, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CommissionPageDto {
    pub items: Vec<CommissionRecordDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

// ===================== Tasks =====================

/// Request body for assigning a task to a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateTaskRequest {
    pub usuario_id: Uuid,
    pub titulo: String,
    /// Lowercase status (default: "pending")
    pub status: Option<String>,
}

/// Task response model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TaskDto {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub titulo: String,
    pub status: String,
}

/// Badge counter payload. Clients should poll again after `refresh_interval_secs`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PendingCountDto {
    pub usuario_id: Uuid,
    pub count: u64,
    pub refresh_interval_secs: u64,
}
