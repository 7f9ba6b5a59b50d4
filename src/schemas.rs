use common::{
    CommissionPageDto, CommissionRecordDto, ComputeCommissionRequest, CreateMachineRequest,
    CreateRouteRequest, CreateStoreRequest, CreateTaskRequest, MachineContributionDto, MachineDto,
    PendingCountDto, Role, RouteDto, StoreDto, TaskDto, UpdateMachineRequest,
};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Pending task count per user, expiring after `badge_refresh`
    pub pending_counts: Cache<Uuid, u64>,
    /// Interval clients should wait before polling the pending count again
    pub badge_refresh: Duration,
}

/// Pagination for commission history
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct CommissionListQuery {
    /// Page number, starting at 1 (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Records per page (default: 20)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::stores::create_store,
        crate::handlers::stores::get_stores,
        crate::handlers::stores::get_store,
        crate::handlers::stores::delete_store,
        crate::handlers::machines::create_machine,
        crate::handlers::machines::get_store_machines,
        crate::handlers::machines::update_machine,
        crate::handlers::machines::delete_machine,
        crate::handlers::routes::create_route,
        crate::handlers::routes::get_routes,
        crate::handlers::routes::delete_route,
        crate::handlers::commissions::compute_commission,
        crate::handlers::commissions::get_store_commissions,
        crate::handlers::commissions::get_commission,
        crate::handlers::commissions::purge_commission,
        crate::handlers::tasks::create_task,
        crate::handlers::tasks::get_pending_count,
    ),
    components(
        schemas(
            ApiResponse<StoreDto>,
            ApiResponse<Vec<StoreDto>>,
            ApiResponse<MachineDto>,
            ApiResponse<Vec<MachineDto>>,
            ApiResponse<RouteDto>,
            ApiResponse<Vec<RouteDto>>,
            ApiResponse<CommissionRecordDto>,
            ApiResponse<CommissionPageDto>,
            ApiResponse<TaskDto>,
            ApiResponse<PendingCountDto>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            CommissionListQuery,
            CreateStoreRequest,
            StoreDto,
            CreateMachineRequest,
            UpdateMachineRequest,
            MachineDto,
            CreateRouteRequest,
            RouteDto,
            ComputeCommissionRequest,
            MachineContributionDto,
            CommissionRecordDto,
            CommissionPageDto,
            CreateTaskRequest,
            TaskDto,
            PendingCountDto,
            Role,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stores", description = "Store management endpoints"),
        (name = "machines", description = "Machine management endpoints"),
        (name = "routes", description = "Route management endpoints"),
        (name = "commissions", description = "Store commission snapshots"),
        (name = "tasks", description = "Tasks and the pending task badge"),
    ),
    info(
        title = "Frota API",
        description = "Store fleet tracking API: machines placed in stores, collection routes and store commission snapshots",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
