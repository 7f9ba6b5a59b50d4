use crate::handlers::{
    commissions::{compute_commission, get_commission, get_store_commissions, purge_commission},
    health::health_check,
    machines::{create_machine, delete_machine, get_store_machines, update_machine},
    routes::{create_route, delete_route, get_routes},
    stores::{create_store, delete_store, get_store, get_stores},
    tasks::{create_task, get_pending_count},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Store routes
        .route("/api/v1/stores", post(create_store).get(get_stores))
        .route("/api/v1/stores/:store_id", get(get_store).delete(delete_store))
        // Machine routes
        .route(
            "/api/v1/stores/:store_id/machines",
            post(create_machine).get(get_store_machines),
        )
        .route(
            "/api/v1/machines/:machine_id",
            put(update_machine).delete(delete_machine),
        )
        // Route (roteiro) routes
        .route("/api/v1/routes", post(create_route).get(get_routes))
        .route("/api/v1/routes/:route_id", axum::routing::delete(delete_route))
        // Commission routes
        .route(
            "/api/v1/stores/:store_id/commissions",
            post(compute_commission).get(get_store_commissions),
        )
        .route(
            "/api/v1/commissions/:commission_id",
            get(get_commission).delete(purge_commission),
        )
        // Task routes
        .route("/api/v1/tasks", post(create_task))
        .route("/api/v1/users/:user_id/pending-count", get(get_pending_count))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
